//! Income vs expense bar panel.

use image::{Rgba, RgbaImage};

use crate::axis::nice_axis;
use crate::panel::{
    draw_category_tick, draw_panel_title, draw_spines, draw_value_axis, fill_rect,
    value_axis_margin, PanelFrame, Rect, TICK_LEN_PT, TICK_PT,
};
use crate::text::{draw_text_aligned, text_size, HAlign};

pub const BAR_TITLE: &str = "Income vs Expense";
pub const BAR_Y_LABEL: &str = "Amount";

/// Fraction of each category slot covered by its bar.
const BAR_WIDTH: f32 = 0.8;

/// One labelled bar.
pub struct Bar<'a> {
    pub label: &'a str,
    pub value: f64,
    pub color: Rgba<u8>,
}

/// Draw a bar chart of `bars` in `area`, returning the plot rectangle.
pub fn draw_bar_panel(
    canvas: &mut RgbaImage,
    frame: &PanelFrame,
    area: Rect,
    bars: &[Bar],
) -> Rect {
    let body = draw_panel_title(canvas, frame, area, BAR_TITLE);

    let tallest = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let axis = nice_axis(tallest, 5);

    let tick_style = frame.regular(TICK_PT);
    let (_, label_h) = text_size(tick_style.font, tick_style.scale, "Ag");
    let bottom_margin = frame.px(TICK_LEN_PT) + label_h + frame.px(10.0);
    let plot = body.inset(
        value_axis_margin(frame, &axis, true),
        frame.px(4.0),
        frame.px(12.0),
        bottom_margin,
    );

    let slot = plot.w as f32 / bars.len().max(1) as f32;
    for (i, bar) in bars.iter().enumerate() {
        let center = plot.x as f32 + slot * (i as f32 + 0.5);
        let half = slot * BAR_WIDTH / 2.0;
        let top = axis.to_pixel(bar.value, plot.bottom(), plot.y);
        let left = (center - half).round() as i32;
        let right = (center + half).round() as i32;
        fill_rect(canvas, Rect::new(left, top, right - left, plot.bottom() - top), bar.color);

        let x = center.round() as i32;
        draw_category_tick(canvas, frame, plot, x);
        draw_text_aligned(
            canvas,
            &tick_style,
            x,
            plot.bottom() + frame.px(TICK_LEN_PT) + frame.px(3.0) + label_h / 2,
            HAlign::Center,
            bar.label,
        );
    }

    draw_value_axis(canvas, frame, plot, &axis, Some(BAR_Y_LABEL));
    draw_spines(canvas, frame, plot);
    plot
}
