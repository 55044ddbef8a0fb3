//! Error types for LED matrix operations

use crate::format::constants::{MAX_GRID_DIMENSION, MAX_REPETITIONS};

/// Errors that can occur while editing or encoding LED sub-matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMatrixError {
    /// Requested grid is larger than the supported maximum
    SizeExceeded {
        /// Requested number of sub-matrix rows
        rows: usize,
        /// Requested number of sub-matrix columns
        cols: usize,
    },
    /// Pixel data is not exactly 8x8
    InvalidDimensions,
    /// Repetition count is zero or above the maximum
    InvalidRepetitions,
    /// Sub-matrix, pixel or history index out of bounds
    IndexOutOfBounds,
    /// Confirmation requested without a pending removal
    NoPendingRemoval,
    /// Token is not a two-digit hexadecimal byte
    InvalidHexByte,
    /// Pixel row pattern is not eight on/off characters
    InvalidPixelRow,
    /// Unknown artifact naming scheme
    InvalidNamingScheme,
    /// Text is not a non-negative decimal number
    InvalidNumber,
    /// Entry name is empty or contains path separators
    InvalidEntryName,
    /// Insufficient buffer space
    InsufficientBuffer,
}

impl core::fmt::Display for LedMatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LedMatrixError::SizeExceeded { rows, cols } => write!(
                f,
                "Requested {rows}x{cols} grid, maximum size is {MAX_GRID_DIMENSION}x{MAX_GRID_DIMENSION}"
            ),
            LedMatrixError::InvalidDimensions => write!(f, "Sub-matrix must be exactly 8x8"),
            LedMatrixError::InvalidRepetitions => {
                write!(f, "Repetitions must be between 1 and {MAX_REPETITIONS}")
            }
            LedMatrixError::IndexOutOfBounds => write!(f, "Index out of bounds"),
            LedMatrixError::NoPendingRemoval => write!(f, "No removal awaiting confirmation"),
            LedMatrixError::InvalidHexByte => write!(f, "Invalid hexadecimal byte"),
            LedMatrixError::InvalidPixelRow => write!(f, "Invalid pixel row pattern"),
            LedMatrixError::InvalidNamingScheme => write!(f, "Unknown naming scheme"),
            LedMatrixError::InvalidNumber => write!(f, "Invalid number"),
            LedMatrixError::InvalidEntryName => write!(f, "Invalid history entry name"),
            LedMatrixError::InsufficientBuffer => write!(f, "Insufficient buffer space"),
        }
    }
}

impl core::error::Error for LedMatrixError {}

/// Result type for LED matrix operations
pub type Result<T> = core::result::Result<T, LedMatrixError>;
