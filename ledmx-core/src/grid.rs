//! Grid of sub-matrices
//!
//! A `GridConfig` is a `rows x cols` arrangement of independent 8x8
//! sub-matrices, stored row-major. Together they form the structure
//! `matrix[superRow][superCol][pixelRow][pixelCol]`.

extern crate alloc;
use alloc::vec::Vec;

use crate::format::constants::SUB_MATRIX_SIZE;
use crate::format::GridPosition;
use crate::sub_matrix::SubMatrix;
use crate::traits::Bitmap;
use crate::validation::{validate_grid_size, validate_position};
use crate::{LedMatrixError, Result};

/// Rectangular arrangement of sub-matrices
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridParts"))]
pub struct GridConfig {
    rows: usize,
    cols: usize,
    cells: Vec<SubMatrix>,
}

/// Unchecked serialized form of a grid
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridParts {
    rows: usize,
    cols: usize,
    cells: Vec<SubMatrix>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridParts> for GridConfig {
    type Error = LedMatrixError;

    fn try_from(parts: GridParts) -> Result<Self> {
        validate_grid_size(parts.rows, parts.cols)?;
        if parts.cells.len() != parts.rows * parts.cols {
            return Err(LedMatrixError::InvalidDimensions);
        }
        Ok(Self {
            rows: parts.rows,
            cols: parts.cols,
            cells: parts.cells,
        })
    }
}

impl GridConfig {
    /// Create an all-off grid of the given shape
    ///
    /// Fails with [`LedMatrixError::SizeExceeded`] when either dimension is
    /// above the maximum.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        validate_grid_size(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: alloc::vec![SubMatrix::new(); rows * cols],
        })
    }

    /// Grid dimensions in sub-matrices as (rows, cols)
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of sub-matrices
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid holds no sub-matrices
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the sub-matrix at a position
    pub fn get(&self, position: GridPosition) -> Option<&SubMatrix> {
        if !position.is_within(self.rows, self.cols) {
            return None;
        }
        self.cells.get(position.linear_index(self.cols))
    }

    /// Get the sub-matrix at a position for mutation
    pub fn get_mut(&mut self, position: GridPosition) -> Result<&mut SubMatrix> {
        validate_position(position, self.rows, self.cols)?;
        self.cells
            .get_mut(position.linear_index(self.cols))
            .ok_or(LedMatrixError::IndexOutOfBounds)
    }

    /// Iterate over all sub-matrices in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, &SubMatrix)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(index, matrix)| {
            (GridPosition::new(index / cols, index % cols), matrix)
        })
    }

    /// Iterate over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| GridPosition::new(row, col)))
    }

    /// Switch every pixel of every sub-matrix off
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(SubMatrix::clear);
    }
}

/// The whole grid viewed as one tiled surface of `rows * 8` by `cols * 8` pixels
impl Bitmap for GridConfig {
    fn pixel(&self, row: usize, col: usize) -> Option<bool> {
        let position = GridPosition::new(row / SUB_MATRIX_SIZE, col / SUB_MATRIX_SIZE);
        self.get(position)?
            .get(row % SUB_MATRIX_SIZE, col % SUB_MATRIX_SIZE)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.rows * SUB_MATRIX_SIZE, self.cols * SUB_MATRIX_SIZE)
    }

    fn lit_count(&self) -> usize {
        self.cells.iter().map(|matrix| matrix.lit_count()).sum()
    }
}
