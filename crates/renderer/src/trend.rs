//! Income/expense trend line panel.

use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};

use crate::axis::nice_axis;
use crate::panel::{
    draw_category_tick, draw_panel_title, draw_placeholder, draw_spines, draw_thick_line,
    draw_value_axis, fill_rect, value_axis_margin, PanelFrame, Rect, LABEL_PT, TICK_LEN_PT,
    TICK_PT,
};
use crate::text::{draw_text_aligned, draw_text_rotated, text_size, HAlign};

pub const TREND_TITLE: &str = "Trend";
pub const TREND_PLACEHOLDER: &str = "No trend data";

/// Rotation of the date labels, degrees counter-clockwise.
const LABEL_ROTATION: f32 = 45.0;

/// Horizontal padding on each side of the first/last point, as a fraction of the plot width.
const X_MARGIN: f32 = 0.05;

const LINE_WIDTH_PT: f32 = 1.5;

/// One plotted series.
pub struct Series<'a> {
    pub name: &'a str,
    pub values: Vec<f64>,
    pub color: Rgba<u8>,
}

/// Every `stride`-th label is drawn so rotated labels do not overlap.
pub fn label_stride(count: usize, max_labels: usize) -> usize {
    if count == 0 {
        return 1;
    }
    count.div_ceil(max_labels.max(1)).max(1)
}

/// Distinct dates in first-appearance order, and the slot of every input date.
///
/// Repeated date strings share one x position.
pub fn date_slots<'a>(dates: &[&'a str]) -> (Vec<&'a str>, Vec<usize>) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut labels = Vec::new();
    let slots = dates
        .iter()
        .map(|date| {
            *seen.entry(*date).or_insert_with(|| {
                labels.push(*date);
                labels.len() - 1
            })
        })
        .collect();
    (labels, slots)
}

/// Pixel column of point `index` out of `count` across `plot`.
pub fn point_x(plot: Rect, index: usize, count: usize) -> f32 {
    if count <= 1 {
        return plot.x as f32 + plot.w as f32 / 2.0;
    }
    let pad = plot.w as f32 * X_MARGIN;
    let span = plot.w as f32 - 2.0 * pad;
    plot.x as f32 + pad + span * index as f32 / (count - 1) as f32
}

/// Draw the trend lines against `dates`, or the placeholder when empty.
pub fn draw_trend_panel(
    canvas: &mut RgbaImage,
    frame: &PanelFrame,
    area: Rect,
    dates: &[&str],
    series: &[Series],
) {
    let body = draw_panel_title(canvas, frame, area, TREND_TITLE);
    if dates.is_empty() {
        draw_placeholder(canvas, frame, body, TREND_PLACEHOLDER);
        return;
    }

    let (labels, slots) = date_slots(dates);
    let highest = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0, f64::max);
    let axis = nice_axis(highest, 5);

    let tick_style = frame.regular(TICK_PT);
    let (_, label_h) = text_size(tick_style.font, tick_style.scale, "Ag");
    let widest = labels
        .iter()
        .map(|d| text_size(tick_style.font, tick_style.scale, d).0)
        .max()
        .unwrap_or(0);
    let (sin, cos) = LABEL_ROTATION.to_radians().sin_cos();
    let label_drop = ((widest as f32 * sin + label_h as f32 * cos).ceil() as i32)
        .min(body.h / 3);
    let plot = body.inset(
        value_axis_margin(frame, &axis, false),
        frame.px(4.0),
        frame.px(12.0),
        frame.px(TICK_LEN_PT) + frame.px(4.0) + label_drop,
    );

    let count = labels.len();
    let line_width = frame.px(LINE_WIDTH_PT) as f32;
    for s in series {
        let points: Vec<(f32, f32)> = s
            .values
            .iter()
            .zip(&slots)
            .map(|(v, slot)| {
                (
                    point_x(plot, *slot, count),
                    axis.to_pixel(*v, plot.bottom(), plot.y) as f32,
                )
            })
            .collect();

        if let [only] = points.as_slice() {
            let radius = (line_width * 1.5).round() as i32;
            draw_filled_circle_mut(
                canvas,
                (only.0.round() as i32, only.1.round() as i32),
                radius,
                s.color,
            );
        }
        for pair in points.windows(2) {
            draw_thick_line(canvas, pair[0], pair[1], line_width, s.color);
        }
    }

    let max_labels = (plot.w / (label_h + frame.px(2.0)).max(1)).max(1) as usize;
    let stride = label_stride(count, max_labels);
    let tick_len = frame.px(TICK_LEN_PT);
    for (i, date) in labels.iter().enumerate() {
        let x = point_x(plot, i, count).round() as i32;
        draw_category_tick(canvas, frame, plot, x);
        if i % stride != 0 {
            continue;
        }
        // anchor the end of the rotated run just under the tick
        let (w, _) = text_size(tick_style.font, tick_style.scale, date);
        let half = w as f32 / 2.0;
        let cx = x as f32 - half * cos;
        let cy = (plot.bottom() + tick_len + frame.px(2.0)) as f32 + half * sin + label_h as f32 * 0.35;
        draw_text_rotated(
            canvas,
            &tick_style,
            cx.round() as i32,
            cy.round() as i32,
            LABEL_ROTATION,
            date,
        );
    }

    draw_value_axis(canvas, frame, plot, &axis, None);
    draw_spines(canvas, frame, plot);
    draw_legend(canvas, frame, plot, series);
}

fn draw_legend(canvas: &mut RgbaImage, frame: &PanelFrame, plot: Rect, series: &[Series]) {
    if series.is_empty() {
        return;
    }
    let style = frame.regular(LABEL_PT);
    let (_, row_h) = text_size(style.font, style.scale, "Ag");
    let sample_w = frame.px(20.0);
    let pad = frame.px(4.0);
    let text_w = series
        .iter()
        .map(|s| text_size(style.font, style.scale, s.name).0)
        .max()
        .unwrap_or(0);

    let box_w = pad * 3 + sample_w + text_w;
    let box_h = pad * 2 + row_h * series.len() as i32;
    let legend = Rect::new(plot.right() - box_w - pad * 2, plot.y + pad * 2, box_w, box_h);
    if legend.w <= 0 || legend.h <= 0 || legend.x < plot.x {
        return;
    }

    fill_rect(canvas, legend, frame.theme.background);
    draw_hollow_rect_mut(
        canvas,
        imageproc::rect::Rect::at(legend.x, legend.y).of_size(legend.w as u32, legend.h as u32),
        frame.theme.legend_frame,
    );

    let line_width = frame.px(LINE_WIDTH_PT) as f32;
    for (i, s) in series.iter().enumerate() {
        let cy = legend.y + pad + row_h * i as i32 + row_h / 2;
        let x0 = legend.x + pad;
        draw_thick_line(
            canvas,
            (x0 as f32, cy as f32),
            ((x0 + sample_w) as f32, cy as f32),
            line_width,
            s.color,
        );
        draw_text_aligned(canvas, &style, x0 + sample_w + pad, cy, HAlign::Left, s.name);
    }
}
