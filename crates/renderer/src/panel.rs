//! Shared panel plumbing: geometry, titles, value axes, spines, placeholders.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};

use crate::axis::AxisScale;
use crate::style::ChartTheme;
use crate::text::{draw_text_aligned, draw_text_centered, draw_text_rotated, text_size, Fonts, HAlign, TextStyle};

/// Font sizes in points.
pub const TITLE_PT: f32 = 12.0;
pub const LABEL_PT: f32 = 10.0;
pub const TICK_PT: f32 = 10.0;

/// Tick mark length in points.
pub const TICK_LEN_PT: f32 = 3.5;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w: w.max(0), h: h.max(0) }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Shrink by the given margins.
    pub fn inset(&self, left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect::new(
            self.x + left,
            self.y + top,
            self.w - left - right,
            self.h - top - bottom,
        )
    }
}

/// Everything a panel needs besides the canvas and its data.
pub struct PanelFrame<'a> {
    pub fonts: &'a Fonts,
    pub theme: ChartTheme,
    /// Pixels per typographic point at the figure's DPI.
    pub px_per_pt: f32,
}

impl<'a> PanelFrame<'a> {
    pub fn new(fonts: &'a Fonts, theme: ChartTheme, dpi: u32) -> Self {
        Self {
            fonts,
            theme,
            px_per_pt: dpi as f32 / 72.0,
        }
    }

    pub fn px(&self, points: f32) -> i32 {
        (points * self.px_per_pt).round() as i32
    }

    pub fn regular(&self, size_pt: f32) -> TextStyle<'a> {
        TextStyle::new(&self.fonts.regular, size_pt * self.px_per_pt, self.theme.text)
    }

    pub fn bold(&self, size_pt: f32) -> TextStyle<'a> {
        TextStyle::new(&self.fonts.bold, size_pt * self.px_per_pt, self.theme.text)
    }
}

/// Draw the panel title and return the area left below it.
pub fn draw_panel_title(canvas: &mut RgbaImage, frame: &PanelFrame, area: Rect, title: &str) -> Rect {
    let style = frame.regular(TITLE_PT);
    let (_, h) = text_size(style.font, style.scale, title);
    let band = h + frame.px(8.0);
    draw_text_centered(canvas, &style, area.x + area.w / 2, area.y + band / 2, title);
    area.inset(0, band, 0, 0)
}

/// Centred message shown instead of axes when a panel has no data.
pub fn draw_placeholder(canvas: &mut RgbaImage, frame: &PanelFrame, area: Rect, message: &str) {
    let (cx, cy) = area.center();
    draw_text_centered(canvas, &frame.regular(LABEL_PT), cx, cy, message);
}

/// Width needed left of the plot for the tick labels of `axis`.
pub fn value_label_width(frame: &PanelFrame, axis: &AxisScale) -> i32 {
    let style = frame.regular(TICK_PT);
    axis.labels()
        .iter()
        .map(|l| text_size(style.font, style.scale, l).0)
        .max()
        .unwrap_or(0)
}

/// Left margin that fits a y-axis label plus the tick labels of `axis`.
pub fn value_axis_margin(frame: &PanelFrame, axis: &AxisScale, with_label: bool) -> i32 {
    let style = frame.regular(LABEL_PT);
    let (_, label_h) = text_size(style.font, style.scale, "Ag");
    let label_band = if with_label { label_h + frame.px(6.0) } else { frame.px(4.0) };
    label_band + value_label_width(frame, axis) + frame.px(TICK_LEN_PT) + frame.px(6.0)
}

/// Tick marks, tick labels and an optional rotated label on the left edge of `plot`.
pub fn draw_value_axis(
    canvas: &mut RgbaImage,
    frame: &PanelFrame,
    plot: Rect,
    axis: &AxisScale,
    label: Option<&str>,
) {
    let tick_style = frame.regular(TICK_PT);
    let tick_len = frame.px(TICK_LEN_PT);
    let spine = frame.theme.spine;

    for (value, text) in axis.ticks.iter().zip(axis.labels()) {
        let y = axis.to_pixel(*value, plot.bottom(), plot.y);
        draw_line_segment_mut(
            canvas,
            ((plot.x - tick_len) as f32, y as f32),
            (plot.x as f32, y as f32),
            spine,
        );
        draw_text_aligned(
            canvas,
            &tick_style,
            plot.x - tick_len - frame.px(2.0),
            y,
            HAlign::Right,
            &text,
        );
    }

    if let Some(label) = label {
        let style = frame.regular(LABEL_PT);
        let (_, h) = text_size(style.font, style.scale, label);
        let x = plot.x - tick_len - frame.px(4.0) - value_label_width(frame, axis) - h / 2 - frame.px(2.0);
        draw_text_rotated(canvas, &style, x, plot.y + plot.h / 2, 90.0, label);
    }
}

/// Tick mark below the plot at column `x`.
pub fn draw_category_tick(canvas: &mut RgbaImage, frame: &PanelFrame, plot: Rect, x: i32) {
    let tick_len = frame.px(TICK_LEN_PT);
    draw_line_segment_mut(
        canvas,
        (x as f32, plot.bottom() as f32),
        (x as f32, (plot.bottom() + tick_len) as f32),
        frame.theme.spine,
    );
}

/// Frame around the plot area.
pub fn draw_spines(canvas: &mut RgbaImage, frame: &PanelFrame, plot: Rect) {
    let (l, t, r, b) = (plot.x as f32, plot.y as f32, plot.right() as f32, plot.bottom() as f32);
    let color = frame.theme.spine;
    draw_line_segment_mut(canvas, (l, t), (r, t), color);
    draw_line_segment_mut(canvas, (r, t), (r, b), color);
    draw_line_segment_mut(canvas, (r, b), (l, b), color);
    draw_line_segment_mut(canvas, (l, b), (l, t), color);
}

/// Filled rectangle that tolerates empty or inverted extents.
pub fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    if rect.w <= 0 || rect.h <= 0 {
        return;
    }
    draw_filled_rect_mut(
        canvas,
        imageproc::rect::Rect::at(rect.x, rect.y).of_size(rect.w as u32, rect.h as u32),
        color,
    );
}

/// Line segment `width` pixels wide with rounded joins.
pub fn draw_thick_line(
    canvas: &mut RgbaImage,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let radius = (width / 2.0).round() as i32;
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len > 0.0 {
        let (nx, ny) = (-dy / len, dx / len);
        let half = (width - 1.0).max(0.0) / 2.0;
        let steps = (width * 2.0).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = -half + 2.0 * half * i as f32 / steps as f32;
            draw_line_segment_mut(
                canvas,
                (from.0 + nx * t, from.1 + ny * t),
                (to.0 + nx * t, to.1 + ny * t),
                color,
            );
        }
    }
    if radius > 0 {
        draw_filled_circle_mut(canvas, (from.0.round() as i32, from.1.round() as i32), radius, color);
        draw_filled_circle_mut(canvas, (to.0.round() as i32, to.1.round() as i32), radius, color);
    }
}
