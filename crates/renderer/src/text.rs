//! Text measurement and drawing with the embedded DejaVu Sans faces.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use once_cell::sync::Lazy;
use rusttype::{point, Font, Scale};

use crate::RenderError;

const REGULAR_FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const BOLD_FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Regular and bold faces, parsed once per process.
pub struct Fonts {
    pub regular: Font<'static>,
    pub bold: Font<'static>,
}

static FONTS: Lazy<Option<Fonts>> = Lazy::new(|| {
    let regular = Font::try_from_bytes(REGULAR_FONT_DATA);
    let bold = Font::try_from_bytes(BOLD_FONT_DATA);
    match (regular, bold) {
        (Some(regular), Some(bold)) => Some(Fonts { regular, bold }),
        _ => {
            tracing::error!("Failed to parse embedded chart fonts");
            None
        }
    }
});

/// Shared font faces.
pub fn fonts() -> Result<&'static Fonts, RenderError> {
    FONTS.as_ref().ok_or(RenderError::FontUnavailable)
}

/// Horizontal anchoring of a text run relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// A font, a size and a color.
#[derive(Clone, Copy)]
pub struct TextStyle<'a> {
    pub font: &'a Font<'static>,
    pub scale: Scale,
    pub color: Rgba<u8>,
}

impl<'a> TextStyle<'a> {
    pub fn new(font: &'a Font<'static>, size_px: f32, color: Rgba<u8>) -> Self {
        Self {
            font,
            scale: Scale::uniform(size_px),
            color,
        }
    }
}

/// Width and line height of `text` in pixels.
pub fn text_size(font: &Font, scale: Scale, text: &str) -> (i32, i32) {
    let v_metrics = font.v_metrics(scale);
    let height = (v_metrics.ascent - v_metrics.descent).ceil() as i32;
    let width = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    (width.ceil() as i32, height)
}

/// Draw `text` with its top-left corner at (x, y).
pub fn draw_text(canvas: &mut RgbaImage, style: &TextStyle, x: i32, y: i32, text: &str) {
    draw_text_mut(canvas, style.color, x, y, style.scale, style.font, text);
}

/// Draw `text` vertically centred on `cy`, anchored horizontally at `x`.
pub fn draw_text_aligned(
    canvas: &mut RgbaImage,
    style: &TextStyle,
    x: i32,
    cy: i32,
    align: HAlign,
    text: &str,
) {
    let (w, h) = text_size(style.font, style.scale, text);
    let left = match align {
        HAlign::Left => x,
        HAlign::Center => x - w / 2,
        HAlign::Right => x - w,
    };
    draw_text(canvas, style, left, cy - h / 2, text);
}

/// Draw `text` centred on (cx, cy).
pub fn draw_text_centered(canvas: &mut RgbaImage, style: &TextStyle, cx: i32, cy: i32, text: &str) {
    draw_text_aligned(canvas, style, cx, cy, HAlign::Center, text);
}

/// Draw `text` rotated counter-clockwise by `degrees`, centred on (cx, cy).
///
/// The run is drawn on an opaque scratch square, rotated, then merged onto
/// the canvas keeping the darker channel of each pixel. The canvas under the
/// text must be lighter than the text color.
pub fn draw_text_rotated(
    canvas: &mut RgbaImage,
    style: &TextStyle,
    cx: i32,
    cy: i32,
    degrees: f32,
    text: &str,
) {
    let (w, h) = text_size(style.font, style.scale, text);
    if w == 0 {
        return;
    }
    let side = (w + h + 4) as u32;
    let white = Rgba([255, 255, 255, 255]);
    let mut scratch = RgbaImage::from_pixel(side, side, white);
    let half = side as i32 / 2;
    draw_text(&mut scratch, style, half - w / 2, half - h / 2, text);

    let rotated = rotate_about_center(
        &scratch,
        -degrees.to_radians(),
        Interpolation::Bilinear,
        white,
    );
    darken_onto(canvas, &rotated, cx - half, cy - half);
}

fn darken_onto(canvas: &mut RgbaImage, overlay: &RgbaImage, left: i32, top: i32) {
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    for (ox, oy, px) in overlay.enumerate_pixels() {
        let x = left + ox as i32;
        let y = top + oy as i32;
        if x < 0 || y < 0 || x >= cw || y >= ch {
            continue;
        }
        let dst = canvas.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            dst.0[c] = dst.0[c].min(px.0[c]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_pixels(img: &RgbaImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_fonts_load() {
        assert!(fonts().is_ok());
    }

    #[test]
    fn test_text_size_grows_with_length() {
        let f = fonts().unwrap();
        let scale = Scale::uniform(20.0);
        let (short, h1) = text_size(&f.regular, scale, "Food");
        let (long, h2) = text_size(&f.regular, scale, "Food and groceries");
        assert!(short > 0);
        assert!(long > short);
        assert_eq!(h1, h2);
        assert_eq!(text_size(&f.regular, scale, "").0, 0);
    }

    #[test]
    fn test_draw_text_centered_is_symmetric() {
        let f = fonts().unwrap();
        let style = TextStyle::new(&f.regular, 24.0, Rgba([0, 0, 0, 255]));
        let mut img = RgbaImage::from_pixel(200, 60, Rgba([255, 255, 255, 255]));
        draw_text_centered(&mut img, &style, 100, 30, "No trend data");

        let dark = dark_pixels(&img);
        assert!(!dark.is_empty());
        let min_x = dark.iter().map(|p| p.0).min().unwrap() as i32;
        let max_x = dark.iter().map(|p| p.0).max().unwrap() as i32;
        assert!(((min_x + max_x) / 2 - 100).abs() <= 4);
    }

    #[test]
    fn test_draw_text_rotated_vertical() {
        let f = fonts().unwrap();
        let style = TextStyle::new(&f.regular, 20.0, Rgba([0, 0, 0, 255]));
        let mut img = RgbaImage::from_pixel(120, 200, Rgba([255, 255, 255, 255]));
        draw_text_rotated(&mut img, &style, 60, 100, 90.0, "Amount");

        let dark = dark_pixels(&img);
        let width = dark.iter().map(|p| p.0).max().unwrap() - dark.iter().map(|p| p.0).min().unwrap();
        let height = dark.iter().map(|p| p.1).max().unwrap() - dark.iter().map(|p| p.1).min().unwrap();
        assert!(height > width, "rotated run should be taller than wide");
    }

    #[test]
    fn test_draw_text_clipped_at_edges() {
        let f = fonts().unwrap();
        let style = TextStyle::new(&f.bold, 30.0, Rgba([0, 0, 0, 255]));
        let mut img = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255]));
        draw_text_rotated(&mut img, &style, 0, 0, 45.0, "Overflowing label");
        draw_text_aligned(&mut img, &style, 40, 10, HAlign::Left, "Off canvas");
    }
}
