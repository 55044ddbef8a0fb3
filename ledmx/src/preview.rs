//! Text rendering of bitmaps
//!
//! Lit pixels are drawn as `#` and unlit pixels as `.`. Whole grids are
//! drawn with a gap between neighbouring sub-matrices.

use std::fmt::Write;

use ledmx_core::pattern::{OFF, ON};
use ledmx_core::{Bitmap, GridConfig, SUB_MATRIX_SIZE};

/// Render any bitmap as lines of `#` and `.`
pub fn render<B: Bitmap + ?Sized>(bitmap: &B) -> String {
    let (rows, cols) = bitmap.dimensions();
    let mut out = String::with_capacity(rows * (cols + 1));
    for row in 0..rows {
        for col in 0..cols {
            out.push(pixel_char(bitmap.pixel(row, col)));
        }
        out.push('\n');
    }
    out
}

/// Render a grid with sub-matrix borders and one-based coordinates
pub fn render_grid(grid: &GridConfig) -> String {
    let (rows, cols) = grid.shape();
    let (pixel_rows, pixel_cols) = grid.dimensions();
    let mut out = String::new();

    if rows == 0 || cols == 0 {
        out.push_str("(empty grid)\n");
        return out;
    }

    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, "{:<width$}", col + 1, width = SUB_MATRIX_SIZE + 1);
    }
    out.push('\n');

    for row in 0..pixel_rows {
        if row % SUB_MATRIX_SIZE == 0 {
            let _ = write!(out, "{:<3}", row / SUB_MATRIX_SIZE + 1);
        } else {
            out.push_str("   ");
        }
        for col in 0..pixel_cols {
            if col > 0 && col % SUB_MATRIX_SIZE == 0 {
                out.push(' ');
            }
            out.push(pixel_char(grid.pixel(row, col)));
        }
        out.push('\n');
        if row % SUB_MATRIX_SIZE == SUB_MATRIX_SIZE - 1 && row + 1 < pixel_rows {
            out.push('\n');
        }
    }
    out
}

fn pixel_char(pixel: Option<bool>) -> char {
    if pixel == Some(true) {
        ON
    } else {
        OFF
    }
}
