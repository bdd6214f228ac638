//! Tests for PNG encoding, checked by decoding the output again.
//!
//! Covers:
//! - Indexed vs RGBA selection
//! - Pixel fidelity through both encoders
//! - The `pHYs` resolution chunk

use image::Rgba;
use renderer::png::{create_png, create_png_auto, dpi_to_pixels_per_metre};
use test_utils::{decode_png, png_pixels_per_metre};

// ============================================================================
// Helper functions
// ============================================================================

/// Flat chart-like canvas: white background, two colored blocks, a black line.
fn chart_like_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let px = if y == height / 2 {
                [0, 0, 0, 255]
            } else if x < width / 3 {
                [0x25, 0x63, 0xeb, 255]
            } else if x > 2 * width / 3 {
                [0xdc, 0x26, 0x26, 255]
            } else {
                [255, 255, 255, 255]
            };
            pixels.extend_from_slice(&px);
        }
    }
    pixels
}

/// Smooth gradient with far more than 256 colors.
fn gradient_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255]);
        }
    }
    pixels
}

// ============================================================================
// Round trip through a decoder
// ============================================================================

#[test]
fn test_indexed_png_decodes_to_same_pixels() {
    let pixels = chart_like_pixels(90, 30);
    let png = create_png_auto(&pixels, 90, 30, Some(140)).unwrap();

    let img = decode_png(&png);
    assert_eq!(img.dimensions(), (90, 30));
    assert_eq!(img.as_raw(), &pixels);
    assert_eq!(*img.get_pixel(0, 0), Rgba([0x25, 0x63, 0xeb, 255]));
}

#[test]
fn test_rgba_png_decodes_to_same_pixels() {
    let pixels = gradient_pixels(300, 40);
    let png = create_png_auto(&pixels, 300, 40, None).unwrap();

    let img = decode_png(&png);
    assert_eq!(img.dimensions(), (300, 40));
    assert_eq!(img.as_raw(), &pixels);
}

#[test]
fn test_transparency_preserved_in_indexed_mode() {
    let pixels = [
        255, 0, 0, 255, // red, opaque
        0, 0, 0, 0, // transparent
        0, 255, 0, 128, // green, semi-transparent
        0, 0, 255, 255, // blue, opaque
    ];
    let png = create_png_auto(&pixels, 2, 2, None).unwrap();
    let img = decode_png(&png);
    assert_eq!(img.get_pixel(1, 0).0[3], 0);
    assert_eq!(img.get_pixel(0, 1).0[3], 128);
}

// ============================================================================
// Format selection
// ============================================================================

#[test]
fn test_indexed_smaller_for_flat_charts() {
    let pixels = chart_like_pixels(210, 63);
    let indexed = create_png_auto(&pixels, 210, 63, None).unwrap();
    let rgba = create_png(&pixels, 210, 63, None).unwrap();
    assert!(
        indexed.len() < rgba.len(),
        "Indexed PNG ({} bytes) should be smaller than RGBA ({} bytes)",
        indexed.len(),
        rgba.len()
    );
}

// ============================================================================
// Resolution metadata
// ============================================================================

#[test]
fn test_dpi_recorded() {
    let pixels = chart_like_pixels(12, 12);
    let ppm = dpi_to_pixels_per_metre(140);

    let indexed = create_png_auto(&pixels, 12, 12, Some(140)).unwrap();
    assert_eq!(png_pixels_per_metre(&indexed), Some((ppm, ppm)));

    let rgba = create_png(&pixels, 12, 12, Some(140)).unwrap();
    assert_eq!(png_pixels_per_metre(&rgba), Some((ppm, ppm)));

    let bare = create_png(&pixels, 12, 12, None).unwrap();
    assert_eq!(png_pixels_per_metre(&bare), None);
}
