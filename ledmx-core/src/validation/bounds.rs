//! Grid and pixel bounds validation

use crate::format::constants::{MAX_GRID_DIMENSION, SUB_MATRIX_SIZE};
use crate::format::GridPosition;
use crate::LedMatrixError;

/// Validate requested grid dimensions against the maximum size
///
/// Zero is accepted and produces an empty grid.
pub const fn validate_grid_size(rows: usize, cols: usize) -> Result<(), LedMatrixError> {
    if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
        return Err(LedMatrixError::SizeExceeded { rows, cols });
    }
    Ok(())
}

/// Validate that a sub-matrix position lies inside a `rows x cols` grid
pub const fn validate_position(
    position: GridPosition,
    rows: usize,
    cols: usize,
) -> Result<(), LedMatrixError> {
    if !position.is_within(rows, cols) {
        return Err(LedMatrixError::IndexOutOfBounds);
    }
    Ok(())
}

/// Validate a pixel coordinate inside one sub-matrix
pub const fn validate_pixel(row: usize, col: usize) -> Result<(), LedMatrixError> {
    if row >= SUB_MATRIX_SIZE || col >= SUB_MATRIX_SIZE {
        return Err(LedMatrixError::IndexOutOfBounds);
    }
    Ok(())
}
