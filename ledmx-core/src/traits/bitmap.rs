//! Read-only pixel access shared by sub-matrices and whole grids

/// Rectangular on/off pixel surface
///
/// Implemented by a single [`SubMatrix`](crate::SubMatrix) and by a full
/// grid, where the sub-matrices are tiled into one larger surface.
pub trait Bitmap {
    /// Get a pixel at the specified position
    ///
    /// Returns `None` if the position is out of bounds.
    fn pixel(&self, row: usize, col: usize) -> Option<bool>;

    /// Get bitmap dimensions in pixels as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Number of pixels that are on
    fn lit_count(&self) -> usize {
        let (rows, cols) = self.dimensions();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&(row, col)| self.pixel(row, col) == Some(true))
            .count()
    }
}
