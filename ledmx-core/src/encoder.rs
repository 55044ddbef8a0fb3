//! Bitmap encoder for 8x8 sub-matrices
//!
//! Each column becomes one byte. Pixel rows are scanned from the bottom
//! (row 7) to the top (row 0) and shifted in most significant bit first,
//! so row 7 lands in bit 7 and row 0 in bit 0.
//!
//! Polarity is active low: a lit pixel produces a `0` bit and an unlit
//! pixel a `1` bit. Flashing tools downstream expect exactly this layout.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

use crate::format::constants::{BYTES_PER_BLOCK, MAX_REPETITIONS, SUB_MATRIX_SIZE};
use crate::sub_matrix::{PixelRows, SubMatrix};
use crate::{LedMatrixError, Result};

/// Encoded columns of one sub-matrix, column 0 first
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnBytes(pub [u8; BYTES_PER_BLOCK]);

impl ColumnBytes {
    /// Columns of a blank sub-matrix
    pub const BLANK: Self = Self([0xFF; BYTES_PER_BLOCK]);

    /// Raw column bytes
    pub const fn as_bytes(&self) -> &[u8; BYTES_PER_BLOCK] {
        &self.0
    }

    /// Two-digit lowercase hex rendering of each column byte
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> Vec<String> {
        self.0.iter().map(|byte| alloc::format!("{byte:02x}")).collect()
    }

    /// Repeat the columns `repetitions` times
    #[cfg(feature = "alloc")]
    pub fn repeat(&self, repetitions: usize) -> Result<Vec<u8>> {
        validate_repetitions(repetitions)?;
        Ok(self.0.repeat(repetitions))
    }
}

impl TryFrom<&[u8]> for ColumnBytes {
    type Error = LedMatrixError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        <[u8; BYTES_PER_BLOCK]>::try_from(bytes)
            .map(Self)
            .map_err(|_| LedMatrixError::InvalidDimensions)
    }
}

impl core::fmt::Display for ColumnBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&HexDump(&self.0), f)
    }
}

/// Space-separated lowercase hex rendering of a byte slice
pub struct HexDump<'a>(pub &'a [u8]);

impl core::fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Accept a repetition count between 1 and [`MAX_REPETITIONS`]
pub const fn validate_repetitions(repetitions: usize) -> Result<usize> {
    if repetitions == 0 || repetitions > MAX_REPETITIONS {
        return Err(LedMatrixError::InvalidRepetitions);
    }
    Ok(repetitions)
}

const fn encode_column(pixels: &PixelRows, col: usize) -> u8 {
    let mut byte = 0u8;
    let mut row = SUB_MATRIX_SIZE;
    while row > 0 {
        row -= 1;
        byte <<= 1;
        if !pixels[row][col] {
            byte |= 1;
        }
    }
    byte
}

/// Encode the eight columns of a sub-matrix
pub const fn encode_columns(matrix: &SubMatrix) -> ColumnBytes {
    let pixels = matrix.pixels();
    let mut columns = [0u8; BYTES_PER_BLOCK];
    let mut col = 0;
    while col < SUB_MATRIX_SIZE {
        columns[col] = encode_column(pixels, col);
        col += 1;
    }
    ColumnBytes(columns)
}

/// Encode a sub-matrix into a caller-provided buffer
///
/// Writes the eight column bytes `repetitions` times and returns the
/// number of bytes written. Usable without an allocator.
pub fn encode_into(matrix: &SubMatrix, repetitions: usize, out: &mut [u8]) -> Result<usize> {
    validate_repetitions(repetitions)?;
    let total = repetitions
        .checked_mul(BYTES_PER_BLOCK)
        .ok_or(LedMatrixError::InsufficientBuffer)?;
    if out.len() < total {
        return Err(LedMatrixError::InsufficientBuffer);
    }

    let columns = encode_columns(matrix);
    for block in out[..total].chunks_exact_mut(BYTES_PER_BLOCK) {
        block.copy_from_slice(&columns.0);
    }
    Ok(total)
}

/// Encode a sub-matrix and repeat the result `repetitions` times
///
/// The output is always `8 * repetitions` bytes long and byte `i` equals
/// column byte `i % 8`.
#[cfg(feature = "alloc")]
pub fn encode(matrix: &SubMatrix, repetitions: usize) -> Result<Vec<u8>> {
    encode_columns(matrix).repeat(repetitions)
}

/// Encode loose pixel rows, rejecting anything that is not 8x8
#[cfg(feature = "alloc")]
pub fn encode_rows<R: AsRef<[bool]>>(rows: &[R], repetitions: usize) -> Result<Vec<u8>> {
    let matrix = SubMatrix::from_rows(rows)?;
    encode(&matrix, repetitions)
}

/// Rebuild a sub-matrix from its eight column bytes
pub const fn decode_columns(columns: &ColumnBytes) -> SubMatrix {
    let mut pixels = [[false; SUB_MATRIX_SIZE]; SUB_MATRIX_SIZE];
    let mut col = 0;
    while col < SUB_MATRIX_SIZE {
        let mut row = 0;
        while row < SUB_MATRIX_SIZE {
            pixels[row][col] = (columns.0[col] & (1 << row)) == 0;
            row += 1;
        }
        col += 1;
    }
    SubMatrix::from_pixels(pixels)
}

/// Split an exported byte dump into 8-byte blocks and decode each one
///
/// Fails with [`LedMatrixError::InvalidDimensions`] when the dump is empty
/// or its length is not a multiple of eight.
#[cfg(feature = "alloc")]
pub fn decode_blocks(bytes: &[u8]) -> Result<Vec<SubMatrix>> {
    let blocks: &[[u8; BYTES_PER_BLOCK]] =
        bytemuck::try_cast_slice(bytes).map_err(|_| LedMatrixError::InvalidDimensions)?;
    if blocks.is_empty() {
        return Err(LedMatrixError::InvalidDimensions);
    }
    Ok(blocks
        .iter()
        .map(|block| decode_columns(&ColumnBytes(*block)))
        .collect())
}
