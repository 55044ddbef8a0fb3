//! Declarative design files
//!
//! A design is a JSON document describing a grid, the pixels that are on,
//! the repetition count, the naming scheme and what to commit. Applying it
//! replays the same store operations an editing session would.

use std::fs;
use std::path::Path;

use ledmx_core::pattern::{OFF, ON};
use ledmx_core::validation::parse_pixel_row;
use ledmx_core::{GridPosition, GridStore, NamingScheme, SubMatrix, DEFAULT_REPETITIONS};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which sub-matrices are committed after the pixels are set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommitSelection {
    /// `"all"` or `"none"`
    Keyword(CommitKeyword),
    /// Explicit zero-based positions, committed in the listed order
    Positions(Vec<GridPosition>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKeyword {
    All,
    None,
}

impl Default for CommitSelection {
    fn default() -> Self {
        CommitSelection::Keyword(CommitKeyword::All)
    }
}

/// Pixels of one sub-matrix, one string per pixel row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixDesign {
    pub row: usize,
    pub col: usize,
    pub pixels: Vec<String>,
}

impl MatrixDesign {
    /// Parse the pixel rows into a sub-matrix
    pub fn to_sub_matrix(&self) -> Result<SubMatrix> {
        let rows = self
            .pixels
            .iter()
            .map(|row| parse_pixel_row(row))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(SubMatrix::from_rows(&rows)?)
    }

    fn from_sub_matrix(position: GridPosition, matrix: &SubMatrix) -> Self {
        let pixels = matrix
            .pixels()
            .iter()
            .map(|row| row.iter().map(|&on| if on { ON } else { OFF }).collect())
            .collect();
        Self {
            row: position.row,
            col: position.col,
            pixels,
        }
    }
}

/// A whole editing session described as data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    pub rows: usize,
    pub cols: usize,
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    #[serde(default)]
    pub naming: NamingScheme,
    #[serde(default)]
    pub matrices: Vec<MatrixDesign>,
    #[serde(default)]
    pub commit: CommitSelection,
}

fn default_repetitions() -> usize {
    DEFAULT_REPETITIONS
}

impl Design {
    /// Parse a design from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a design file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded design from {}", path.as_ref().display());
        Self::from_json(&text)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the design to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Build a store by replaying the design
    ///
    /// Any invalid part aborts the whole build; no partial store is returned.
    pub fn apply(&self) -> Result<GridStore> {
        let mut store = GridStore::new().with_naming(self.naming);
        store.configure(self.rows, self.cols)?;
        store.set_repetitions(self.repetitions)?;

        for design in &self.matrices {
            let matrix = design.to_sub_matrix()?;
            for (row, pixels) in matrix.pixels().iter().enumerate() {
                for (col, &on) in pixels.iter().enumerate() {
                    if on {
                        store.set_pixel(design.row, design.col, row, col, true)?;
                    }
                }
            }
        }

        match &self.commit {
            CommitSelection::Keyword(CommitKeyword::All) => {
                store.commit_all()?;
            }
            CommitSelection::Keyword(CommitKeyword::None) => {}
            CommitSelection::Positions(positions) => {
                for position in positions {
                    store.commit(position.row, position.col)?;
                }
            }
        }

        log::info!(
            "Applied design: {}x{} grid, {} entries",
            self.rows,
            self.cols,
            store.history().len()
        );
        Ok(store)
    }

    /// Snapshot the grid of a store
    ///
    /// Blank sub-matrices are left out. The snapshot commits every
    /// sub-matrix when applied.
    pub fn capture(store: &GridStore) -> Self {
        let (rows, cols) = store.grid().shape();
        let matrices = store
            .grid()
            .iter()
            .filter(|(_, matrix)| !matrix.is_blank())
            .map(|(position, matrix)| MatrixDesign::from_sub_matrix(position, matrix))
            .collect();

        Self {
            rows,
            cols,
            repetitions: store.repetitions(),
            naming: store.naming(),
            matrices,
            commit: CommitSelection::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use ledmx_core::{HistoryPayload, LedMatrixError};

    const SAMPLE: &str = r##"{
        "rows": 1,
        "cols": 2,
        "repetitions": 4,
        "naming": "compact",
        "matrices": [
            {
                "row": 0,
                "col": 1,
                "pixels": ["#.......", "........", "........", "........",
                           "........", "........", "........", "#......."]
            }
        ],
        "commit": "all"
    }"##;

    #[test]
    fn test_apply_sample_design() {
        let store = Design::from_json(SAMPLE).unwrap().apply().unwrap();

        assert_eq!(store.grid().shape(), (1, 2));
        assert_eq!(store.repetitions(), 4);
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.history()[1].name, "m_12");

        match &store.history()[1].payload {
            HistoryPayload::Encoded {
                columns,
                repetitions,
                ..
            } => {
                // rows 0 and 7 lit in column 0
                assert_eq!(columns.0[0], 0x7E);
                assert_eq!(columns.0[1..], [0xFF; 7]);
                assert_eq!(*repetitions, 4);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_defaults_and_position_list() {
        let design = Design::from_json(
            r#"{"rows": 2, "cols": 2, "commit": [{"row": 1, "col": 0}, {"row": 0, "col": 0}]}"#,
        )
        .unwrap();
        assert_eq!(design.repetitions, DEFAULT_REPETITIONS);
        assert_eq!(design.naming, NamingScheme::Separated);

        let store = design.apply().unwrap();
        let names: Vec<_> = store.history().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["m2_1", "m1_1"]);

        let none = Design::from_json(r#"{"rows": 1, "cols": 1, "commit": "none"}"#).unwrap();
        assert!(none.apply().unwrap().history().is_empty());
    }

    #[test]
    fn test_invalid_designs() {
        let oversized = Design::from_json(r#"{"rows": 6, "cols": 1}"#).unwrap();
        assert!(matches!(
            oversized.apply(),
            Err(ExportError::Core(LedMatrixError::SizeExceeded { rows: 6, cols: 1 }))
        ));

        let bad_row = Design::from_json(
            r##"{"rows": 1, "cols": 1, "matrices": [{"row": 0, "col": 0, "pixels": ["#"]}]}"##,
        )
        .unwrap();
        assert!(matches!(
            bad_row.apply(),
            Err(ExportError::Core(LedMatrixError::InvalidPixelRow))
        ));

        let outside = Design::from_json(
            r##"{"rows": 1, "cols": 1, "matrices": [{"row": 0, "col": 3, "pixels":
                ["#.......", "........", "........", "........",
                 "........", "........", "........", "........"]}]}"##,
        )
        .unwrap();
        assert!(matches!(
            outside.apply(),
            Err(ExportError::Core(LedMatrixError::IndexOutOfBounds))
        ));

        assert!(matches!(
            Design::from_json("{ not json"),
            Err(ExportError::Design(_))
        ));
    }

    #[test]
    fn test_capture_then_apply_restores_grid() {
        let mut store = GridStore::new().with_naming(NamingScheme::Compact);
        store.configure(2, 3).unwrap();
        store.set_repetitions(7).unwrap();
        store.toggle(1, 2, 3, 4).unwrap();
        store.toggle(0, 0, 0, 7).unwrap();

        let design = Design::capture(&store);
        assert_eq!(design.matrices.len(), 2);
        assert_eq!(design.matrices[0].pixels[0], ".......#");

        let restored = design.apply().unwrap();
        assert_eq!(restored.grid(), store.grid());
        assert_eq!(restored.repetitions(), 7);
        assert_eq!(restored.naming(), NamingScheme::Compact);
        assert_eq!(restored.history().len(), 6);
    }

    #[test]
    fn test_random_grids_survive_json() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let mut store = GridStore::new();
            store.configure(rng.gen_range(1..=5), rng.gen_range(1..=5)).unwrap();
            let (rows, cols) = store.grid().shape();
            for _ in 0..40 {
                store
                    .toggle(
                        rng.gen_range(0..rows),
                        rng.gen_range(0..cols),
                        rng.gen_range(0..8),
                        rng.gen_range(0..8),
                    )
                    .unwrap();
            }

            let json = Design::capture(&store).to_json().unwrap();
            let restored = Design::from_json(&json).unwrap().apply().unwrap();
            assert_eq!(restored.grid(), store.grid());
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.json");

        let design = Design::from_json(SAMPLE).unwrap();
        design.save(&path).unwrap();
        assert_eq!(Design::load(&path).unwrap(), design);
    }
}
