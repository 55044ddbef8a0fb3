//! 8x8 LED sub-matrix
//!
//! A sub-matrix is the unit the encoder works on: eight rows of eight
//! pixels, `true` meaning the LED is on. The shape is fixed by the type,
//! so no operation can grow or shrink it.

use crate::format::constants::SUB_MATRIX_SIZE;
use crate::traits::Bitmap;
use crate::{LedMatrixError, Result};

/// Pixel rows of a sub-matrix, indexed `[row][col]`
pub type PixelRows = [[bool; SUB_MATRIX_SIZE]; SUB_MATRIX_SIZE];

/// One 8x8 block of LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubMatrix {
    pixels: PixelRows,
}

impl SubMatrix {
    /// Create a sub-matrix with every pixel off
    pub const fn new() -> Self {
        Self::filled(false)
    }

    /// Create a sub-matrix with every pixel set to `on`
    pub const fn filled(on: bool) -> Self {
        Self {
            pixels: [[on; SUB_MATRIX_SIZE]; SUB_MATRIX_SIZE],
        }
    }

    /// Wrap existing pixel rows
    pub const fn from_pixels(pixels: PixelRows) -> Self {
        Self { pixels }
    }

    /// Build a sub-matrix from row slices
    ///
    /// Fails with [`LedMatrixError::InvalidDimensions`] unless there are
    /// exactly eight rows of exactly eight pixels. Nothing is truncated.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != SUB_MATRIX_SIZE {
            return Err(LedMatrixError::InvalidDimensions);
        }

        let mut pixels = [[false; SUB_MATRIX_SIZE]; SUB_MATRIX_SIZE];
        for (target, row) in pixels.iter_mut().zip(rows) {
            let row = row.as_ref();
            if row.len() != SUB_MATRIX_SIZE {
                return Err(LedMatrixError::InvalidDimensions);
            }
            target.copy_from_slice(row);
        }

        Ok(Self { pixels })
    }

    /// Pixel rows, indexed `[row][col]`
    pub const fn pixels(&self) -> &PixelRows {
        &self.pixels
    }

    /// Get one pixel, `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.pixels.get(row)?.get(col).copied()
    }

    /// Set one pixel
    pub fn set(&mut self, row: usize, col: usize, on: bool) -> Result<()> {
        *self.cell_mut(row, col)? = on;
        Ok(())
    }

    /// Flip one pixel and return its new value
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool> {
        let cell = self.cell_mut(row, col)?;
        *cell = !*cell;
        Ok(*cell)
    }

    /// Switch every pixel off
    pub fn clear(&mut self) {
        self.pixels = [[false; SUB_MATRIX_SIZE]; SUB_MATRIX_SIZE];
    }

    /// Pixels of one column, top row first
    pub fn column(&self, col: usize) -> Option<[bool; SUB_MATRIX_SIZE]> {
        if col >= SUB_MATRIX_SIZE {
            return None;
        }
        let mut column = [false; SUB_MATRIX_SIZE];
        for (target, row) in column.iter_mut().zip(&self.pixels) {
            *target = row[col];
        }
        Some(column)
    }

    /// True when no pixel is on
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().flatten().all(|on| !on)
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut bool> {
        self.pixels
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(LedMatrixError::IndexOutOfBounds)
    }
}

impl From<PixelRows> for SubMatrix {
    fn from(pixels: PixelRows) -> Self {
        Self::from_pixels(pixels)
    }
}

impl Bitmap for SubMatrix {
    fn pixel(&self, row: usize, col: usize) -> Option<bool> {
        self.get(row, col)
    }

    fn dimensions(&self) -> (usize, usize) {
        (SUB_MATRIX_SIZE, SUB_MATRIX_SIZE)
    }

    fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|on| **on).count()
    }
}
