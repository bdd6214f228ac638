//! Helpers for inspecting rendered PNG output.

use image::{Rgba, RgbaImage};

/// Decode PNG bytes into an RGBA image, panicking with context on failure.
pub fn decode_png(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .unwrap_or_else(|e| panic!("output is not a decodable PNG: {}", e))
        .to_rgba8()
}

/// Pixels-per-metre from the `pHYs` chunk, if present.
pub fn png_pixels_per_metre(bytes: &[u8]) -> Option<(u32, u32)> {
    let mut pos = 8;
    while pos + 8 <= bytes.len() {
        let len = u32::from_be_bytes(bytes[pos..pos + 4].try_into().ok()?) as usize;
        let kind = &bytes[pos + 4..pos + 8];
        let data = bytes.get(pos + 8..pos + 8 + len)?;
        if kind == b"pHYs" && len == 9 {
            let x = u32::from_be_bytes(data[0..4].try_into().ok()?);
            let y = u32::from_be_bytes(data[4..8].try_into().ok()?);
            return Some((x, y));
        }
        pos += 12 + len;
    }
    None
}

/// Count pixels of exactly `color` inside the column band `[x0, x1)`.
pub fn count_color_in_columns(img: &RgbaImage, color: Rgba<u8>, x0: u32, x1: u32) -> usize {
    img.enumerate_pixels()
        .filter(|(x, _, p)| *x >= x0 && *x < x1 && **p == color)
        .count()
}
