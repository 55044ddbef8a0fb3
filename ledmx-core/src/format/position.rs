//! Addressing of sub-matrices within a grid

/// Zero-based position of a sub-matrix in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    /// Sub-matrix row (super row)
    pub row: usize,
    /// Sub-matrix column (super column)
    pub col: usize,
}

impl GridPosition {
    /// Create a new grid position
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// One-based (row, col) pair as shown to users and used in file names
    pub const fn one_based(self) -> (usize, usize) {
        (self.row + 1, self.col + 1)
    }

    /// Check that the position lies within a `rows x cols` grid
    pub const fn is_within(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// Row-major index of this position in a grid with `cols` columns
    pub const fn linear_index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

impl From<(usize, usize)> for GridPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl core::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (row, col) = self.one_based();
        write!(f, "({row}, {col})")
    }
}
