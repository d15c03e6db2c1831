use std::fmt::Write;

use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::classify::SymbolGrid;
use crate::grid::HeightMap;
use crate::utils::{NORMALIZED_MAX, NormalizedMap};

// Column width of one height value in text output
pub const CELL_WIDTH: usize = 4;

// Heights as right-aligned 4-column fields, no separator, one row per line
pub fn format_heights(map: &HeightMap) -> String {
    let mut out = String::with_capacity((map.width() * CELL_WIDTH + 1) * map.height());
    for row in map.rows() {
        for v in row {
            // writing into a String cannot fail
            let _ = write!(out, "{v:>width$}", width = CELL_WIDTH);
        }
        out.push('\n');
    }
    out
}

pub fn symbol_rows(symbols: &SymbolGrid) -> Vec<String> {
    symbols
        .rows()
        .map(|row| row.iter().map(|t| t.symbol()).collect())
        .collect()
}

// Symbols concatenated per row, one row per line
pub fn format_symbols(symbols: &SymbolGrid) -> String {
    let mut out = String::with_capacity((symbols.width() + 1) * symbols.height());
    for row in symbol_rows(symbols) {
        out.push_str(&row);
        out.push('\n');
    }
    out
}

// Convert a symbol grid into an RGB byte buffer, row-major
pub fn symbols_to_rgb(symbols: &SymbolGrid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(symbols.as_slice().len() * 3);
    for t in symbols.as_slice() {
        buf.extend_from_slice(&t.preview_rgb());
    }
    buf
}

// Continuous colouring of the normalized heights: deep blue through sand and green to snow
pub fn heights_to_rgb(map: &NormalizedMap) -> Vec<u8> {
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.0, 0.0, 0.5)),  // deep blue
        (0.40, LinSrgb::new(0.0, 0.5, 1.0)),  // shallows
        (0.45, LinSrgb::new(0.8, 0.8, 0.5)),  // sand
        (0.65, LinSrgb::new(0.1, 0.6, 0.2)),  // green
        (0.85, LinSrgb::new(0.5, 0.4, 0.3)),  // rock
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),  // snow
    ]);

    let cells = map.heights().as_slice();
    let mut buf = Vec::with_capacity(cells.len() * 3);
    for &v in cells {
        let col: LinSrgb = gradient.get(v as f32 / NORMALIZED_MAX as f32);
        let rgb = col.into_format::<u8>();
        buf.extend_from_slice(&[rgb.red, rgb.green, rgb.blue]);
    }
    buf
}

// One pixel per cell, `scale`×`scale` blocks
pub fn symbols_to_image(symbols: &SymbolGrid, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let w = symbols.width() as u32;
    let h = symbols.height() as u32;
    RgbImage::from_fn(w * scale, h * scale, |px, py| {
        let t = symbols[((px / scale) as usize, (py / scale) as usize)];
        Rgb(t.preview_rgb())
    })
}
