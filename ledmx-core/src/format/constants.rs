//! Format constants for LED sub-matrices and exported artifacts

/// Width and height of one sub-matrix in pixels
pub const SUB_MATRIX_SIZE: usize = 8;

/// Encoded bytes per sub-matrix (one per column)
pub const BYTES_PER_BLOCK: usize = SUB_MATRIX_SIZE;

/// Maximum number of sub-matrix rows or columns in a grid
pub const MAX_GRID_DIMENSION: usize = 5;

/// Repetition count used when none is given
pub const DEFAULT_REPETITIONS: usize = 10;

/// Largest accepted repetition count, keeping one artifact at 8 MiB or less
pub const MAX_REPETITIONS: usize = 1 << 20;

/// File extension of exported artifacts
pub const ARTIFACT_EXTENSION: &str = "bin";

/// Pixel row pattern characters
pub mod pattern {
    /// Character used when rendering a lit pixel
    pub const ON: char = '#';

    /// Character used when rendering an unlit pixel
    pub const OFF: char = '.';

    /// Characters accepted as a lit pixel when parsing
    pub const ON_CHARS: [char; 4] = ['#', 'X', 'x', '1'];

    /// Characters accepted as an unlit pixel when parsing
    pub const OFF_CHARS: [char; 4] = ['.', '-', '0', '_'];
}
