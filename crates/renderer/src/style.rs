//! Colors used when drawing report figures.

use image::Rgba;

/// Build an opaque color from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

/// Categorical palette for pie slices (the classic ten-color cycle).
pub const CATEGORY_PALETTE: [Rgba<u8>; 10] = [
    rgb(0x1f77b4),
    rgb(0xff7f0e),
    rgb(0x2ca02c),
    rgb(0xd62728),
    rgb(0x9467bd),
    rgb(0x8c564b),
    rgb(0xe377c2),
    rgb(0x7f7f7f),
    rgb(0xbcbd22),
    rgb(0x17becf),
];

/// Slice color for the `index`-th category, cycling through the palette.
pub fn category_color(index: usize) -> Rgba<u8> {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

/// Color scheme for one figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    pub background: Rgba<u8>,
    pub text: Rgba<u8>,
    pub spine: Rgba<u8>,
    pub legend_frame: Rgba<u8>,
    pub income: Rgba<u8>,
    pub expense: Rgba<u8>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: rgb(0xffffff),
            text: rgb(0x000000),
            spine: rgb(0x000000),
            legend_frame: rgb(0xcccccc),
            income: rgb(0x2563eb),
            expense: rgb(0xdc2626),
        }
    }
}
