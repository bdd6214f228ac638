//! Expense category share pie panel.

use image::RgbaImage;

use crate::panel::{draw_panel_title, draw_placeholder, PanelFrame, Rect, LABEL_PT};
use crate::style::category_color;
use crate::text::{draw_text_aligned, draw_text_centered, HAlign};

pub const PIE_TITLE: &str = "Expense Category Share";
pub const PIE_PLACEHOLDER: &str = "No expense data";

/// Angle of the first wedge edge, degrees counter-clockwise from east.
const START_ANGLE: f64 = 90.0;
const LABEL_DISTANCE: f64 = 1.1;
const PCT_DISTANCE: f64 = 0.6;

/// Fraction of the smaller panel dimension used for the pie diameter.
const DIAMETER_FRACTION: f64 = 0.66;

/// Cumulative fractions `[0, f0, f0+f1, ..., 1]` for the given sizes.
///
/// Sizes are scaled by the largest one before summing, so totals near
/// `f64::MAX` do not overflow. Returns `None` when no size is positive.
pub fn wedge_boundaries(sizes: &[f64]) -> Option<Vec<f64>> {
    let largest = sizes.iter().copied().fold(0.0, f64::max);
    if !(largest > 0.0) || !largest.is_finite() {
        return None;
    }
    let total: f64 = sizes.iter().map(|s| s / largest).sum();
    let mut acc = 0.0;
    let mut bounds = Vec::with_capacity(sizes.len() + 1);
    bounds.push(0.0);
    for size in sizes {
        acc += size / largest / total;
        bounds.push(acc.min(1.0));
    }
    if let Some(last) = bounds.last_mut() {
        *last = 1.0;
    }
    Some(bounds)
}

/// Index of the wedge containing `fraction` (0..1 measured from the start angle).
pub fn wedge_at(bounds: &[f64], fraction: f64) -> usize {
    let slices = bounds.len().saturating_sub(1);
    bounds
        .partition_point(|&b| b <= fraction)
        .saturating_sub(1)
        .min(slices.saturating_sub(1))
}

/// Percentage annotation, one decimal place.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Draw the category pie, or the placeholder when there is nothing to show.
pub fn draw_pie_panel(
    canvas: &mut RgbaImage,
    frame: &PanelFrame,
    area: Rect,
    labels: &[&str],
    sizes: &[f64],
) {
    let body = draw_panel_title(canvas, frame, area, PIE_TITLE);

    let Some(bounds) = wedge_boundaries(sizes) else {
        draw_placeholder(canvas, frame, body, PIE_PLACEHOLDER);
        return;
    };

    let (cx, cy) = body.center();
    let radius = (body.w.min(body.h) as f64 * DIAMETER_FRACTION / 2.0).floor();
    fill_wedges(canvas, cx as f64, cy as f64, radius, &bounds);

    let style = frame.regular(LABEL_PT);
    for (i, window) in bounds.windows(2).enumerate() {
        let mid = START_ANGLE + 360.0 * (window[0] + window[1]) / 2.0;
        let (cos, sin) = (mid.to_radians().cos(), mid.to_radians().sin());

        let lx = cx as f64 + LABEL_DISTANCE * radius * cos;
        let ly = cy as f64 - LABEL_DISTANCE * radius * sin;
        let align = if cos > 0.0 { HAlign::Left } else { HAlign::Right };
        let label = labels.get(i).copied().unwrap_or("");
        draw_text_aligned(canvas, &style, lx.round() as i32, ly.round() as i32, align, label);

        let px = cx as f64 + PCT_DISTANCE * radius * cos;
        let py = cy as f64 - PCT_DISTANCE * radius * sin;
        draw_text_centered(
            canvas,
            &style,
            px.round() as i32,
            py.round() as i32,
            &format_percent(window[1] - window[0]),
        );
    }
}

fn fill_wedges(canvas: &mut RgbaImage, cx: f64, cy: f64, radius: f64, bounds: &[f64]) {
    let r2 = radius * radius;
    let r = radius as i64;
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);

    for y in (cy as i64 - r)..=(cy as i64 + r) {
        for x in (cx as i64 - r)..=(cx as i64 + r) {
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            let dx = x as f64 + 0.5 - cx;
            let dy = cy - (y as f64 + 0.5);
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let angle = dy.atan2(dx).to_degrees();
            let fraction = (angle - START_ANGLE).rem_euclid(360.0) / 360.0;
            let slice = wedge_at(bounds, fraction);
            canvas.put_pixel(x as u32, y as u32, category_color(slice));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ChartTheme, CATEGORY_PALETTE};
    use crate::text::fonts;
    use image::Rgba;

    #[test]
    fn test_wedge_boundaries() {
        let b = wedge_boundaries(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(b, vec![0.0, 0.25, 0.5, 1.0]);
        assert!(wedge_boundaries(&[]).is_none());
        assert!(wedge_boundaries(&[0.0, 0.0]).is_none());
    }

    #[test]
    fn test_wedge_boundaries_near_float_max() {
        let b = wedge_boundaries(&[1e308, 1e308]).unwrap();
        assert_eq!(b, vec![0.0, 0.5, 1.0]);

        let b = wedge_boundaries(&[f64::MAX, f64::MAX, f64::MAX, f64::MAX]).unwrap();
        assert_eq!(b, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let b = wedge_boundaries(&[5e-324, 5e-324]).unwrap();
        assert_eq!(b, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_huge_totals_still_draw_slices() {
        let theme = ChartTheme::default();
        let frame = PanelFrame::new(fonts().unwrap(), theme, 140);
        let mut img = RgbaImage::from_pixel(600, 600, theme.background);
        draw_pie_panel(
            &mut img,
            &frame,
            Rect::new(0, 0, 600, 600),
            &["A", "B"],
            &[1e308, 1e308],
        );
        let first = img.pixels().filter(|p| **p == category_color(0)).count();
        let second = img.pixels().filter(|p| **p == category_color(1)).count();
        assert!(first > 1000 && second > 1000, "{} {}", first, second);
    }

    #[test]
    fn test_wedge_at_skips_empty_slices() {
        let b = wedge_boundaries(&[1.0, 0.0, 1.0]).unwrap();
        assert_eq!(wedge_at(&b, 0.1), 0);
        assert_eq!(wedge_at(&b, 0.5), 2);
        assert_eq!(wedge_at(&b, 0.99), 2);
        assert_eq!(wedge_at(&b, 1.0), 2);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(1.0 / 3.0), "33.3%");
    }

    #[test]
    fn test_first_wedge_starts_at_top_counter_clockwise() {
        let theme = ChartTheme::default();
        let frame = PanelFrame::new(fonts().unwrap(), theme, 140);
        let mut img = RgbaImage::from_pixel(600, 600, theme.background);
        draw_pie_panel(
            &mut img,
            &frame,
            Rect::new(0, 0, 600, 600),
            &["Food", "Rent"],
            &[1.0, 3.0],
        );

        let colors: Vec<Rgba<u8>> = img
            .pixels()
            .copied()
            .filter(|p| CATEGORY_PALETTE.contains(p))
            .collect();
        let first = colors.iter().filter(|p| **p == category_color(0)).count();
        let second = colors.iter().filter(|p| **p == category_color(1)).count();
        let share = first as f64 / (first + second) as f64;
        assert!((share - 0.25).abs() < 0.02, "share {}", share);

        // a quarter wedge from 12 o'clock counter-clockwise covers the upper-left quadrant
        let body = Rect::new(0, 0, 600, 600);
        let (cx, cy) = body.center();
        let probe = img.get_pixel((cx - 60) as u32, (cy - 20) as u32);
        assert_eq!(*probe, category_color(0));
    }

    #[test]
    fn test_empty_breakdown_is_placeholder() {
        let theme = ChartTheme::default();
        let frame = PanelFrame::new(fonts().unwrap(), theme, 140);
        let mut img = RgbaImage::from_pixel(400, 300, theme.background);
        draw_pie_panel(&mut img, &frame, Rect::new(0, 0, 400, 300), &[], &[]);
        assert!(!img.pixels().any(|p| *p == category_color(0)));
        assert!(img.pixels().any(|p| p.0[0] < 100));
    }
}
