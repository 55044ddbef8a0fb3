//! Grid state store
//!
//! `GridStore` owns everything an editing session mutates: the grid of
//! sub-matrices, the history list, the repetition count, the naming
//! scheme and a pending two-phase removal. All operations are synchronous
//! and run to completion; callers serialize them through their own event
//! loop.

extern crate alloc;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::encoder::{encode_columns, validate_repetitions};
use crate::format::constants::{ARTIFACT_EXTENSION, DEFAULT_REPETITIONS};
use crate::format::{GridPosition, NamingScheme};
use crate::grid::GridConfig;
use crate::history::{validate_entry_name, Artifact, HistoryEntry};
use crate::sub_matrix::SubMatrix;
use crate::validation::{parse_hex_sequence, parse_repetitions_input, validate_pixel};
use crate::{LedMatrixError, Result};

/// In-memory state of one editing session
#[derive(Debug, Clone)]
pub struct GridStore {
    grid: GridConfig,
    history: Vec<HistoryEntry>,
    repetitions: usize,
    naming: NamingScheme,
    pending_removal: Option<usize>,
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GridStore {
    /// Create a store with an empty grid and empty history
    pub fn new() -> Self {
        Self {
            grid: GridConfig::default(),
            history: Vec::new(),
            repetitions: DEFAULT_REPETITIONS,
            naming: NamingScheme::default(),
            pending_removal: None,
        }
    }

    /// Set the naming scheme for subsequent commits
    pub fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    /// Current grid
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// History entries, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Repetition count applied by the next commit
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Naming scheme applied by the next commit
    pub fn naming(&self) -> NamingScheme {
        self.naming
    }

    /// Change the naming scheme; existing entries keep their names
    pub fn set_naming(&mut self, naming: NamingScheme) {
        self.naming = naming;
    }

    /// Index of the entry awaiting removal confirmation
    pub fn pending_removal(&self) -> Option<usize> {
        self.pending_removal
    }

    /// Sub-matrix at a grid position
    pub fn sub_matrix(&self, super_row: usize, super_col: usize) -> Option<&SubMatrix> {
        self.grid.get(GridPosition::new(super_row, super_col))
    }

    /// Replace the grid with a blank one of the given shape and reset history
    ///
    /// On [`LedMatrixError::SizeExceeded`] nothing changes.
    pub fn configure(&mut self, rows: usize, cols: usize) -> Result<()> {
        let grid = GridConfig::new(rows, cols)?;
        self.grid = grid;
        self.history.clear();
        self.pending_removal = None;
        Ok(())
    }

    /// Flip one pixel and return its new value
    pub fn toggle(
        &mut self,
        super_row: usize,
        super_col: usize,
        pixel_row: usize,
        pixel_col: usize,
    ) -> Result<bool> {
        validate_pixel(pixel_row, pixel_col)?;
        self.grid
            .get_mut(GridPosition::new(super_row, super_col))?
            .toggle(pixel_row, pixel_col)
    }

    /// Set one pixel to a given value
    pub fn set_pixel(
        &mut self,
        super_row: usize,
        super_col: usize,
        pixel_row: usize,
        pixel_col: usize,
        on: bool,
    ) -> Result<()> {
        validate_pixel(pixel_row, pixel_col)?;
        self.grid
            .get_mut(GridPosition::new(super_row, super_col))?
            .set(pixel_row, pixel_col, on)
    }

    /// Set the repetition count; zero is rejected
    pub fn set_repetitions(&mut self, repetitions: usize) -> Result<()> {
        self.repetitions = validate_repetitions(repetitions)?;
        Ok(())
    }

    /// Set the repetition count from free-form input, falling back to the default
    pub fn set_repetitions_input(&mut self, input: &str) -> usize {
        self.repetitions = parse_repetitions_input(input);
        self.repetitions
    }

    /// Encode one sub-matrix and append it to history
    ///
    /// Returns the index of the new entry.
    pub fn commit(&mut self, super_row: usize, super_col: usize) -> Result<usize> {
        let position = GridPosition::new(super_row, super_col);
        let matrix = self
            .grid
            .get(position)
            .ok_or(LedMatrixError::IndexOutOfBounds)?;

        let entry = HistoryEntry::encoded(
            self.naming.entry_name(position),
            position,
            encode_columns(matrix),
            self.repetitions,
        )?;
        Ok(self.push_entry(entry))
    }

    /// Commit every sub-matrix in row-major order
    ///
    /// Returns the number of entries added.
    pub fn commit_all(&mut self) -> Result<usize> {
        let positions: Vec<_> = self.grid.positions().collect();
        for position in &positions {
            self.commit(position.row, position.col)?;
        }
        Ok(positions.len())
    }

    /// Append a literal byte sequence parsed from hex text
    pub fn import_hex(&mut self, name: &str, hex: &str) -> Result<usize> {
        validate_entry_name(name)?;
        let bytes = parse_hex_sequence(hex)?;
        Ok(self.push_entry(HistoryEntry::raw(name.to_string(), bytes)))
    }

    /// First phase of a confirmed removal
    ///
    /// Records `index` and returns the entry so the caller can ask for
    /// confirmation. Replaces any earlier request.
    pub fn request_removal(&mut self, index: usize) -> Result<&HistoryEntry> {
        let entry = self
            .history
            .get(index)
            .ok_or(LedMatrixError::IndexOutOfBounds)?;
        self.pending_removal = Some(index);
        Ok(entry)
    }

    /// Second phase of a confirmed removal
    pub fn confirm_removal(&mut self) -> Result<HistoryEntry> {
        let index = self
            .pending_removal
            .take()
            .ok_or(LedMatrixError::NoPendingRemoval)?;
        self.remove(index)
    }

    /// Drop the pending removal request, returning its index
    pub fn cancel_removal(&mut self) -> Option<usize> {
        self.pending_removal.take()
    }

    /// Remove one entry immediately, keeping the others in order
    pub fn remove(&mut self, index: usize) -> Result<HistoryEntry> {
        if index >= self.history.len() {
            return Err(LedMatrixError::IndexOutOfBounds);
        }
        self.pending_removal = None;
        Ok(self.history.remove(index))
    }

    /// Remove the newest entry
    pub fn remove_last(&mut self) -> Option<HistoryEntry> {
        self.pending_removal = None;
        self.history.pop()
    }

    /// Switch every pixel off; grid shape and history are kept
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// One artifact per history entry, in history order
    ///
    /// Repeated names get ` (2)`, ` (3)`, ... inserted before the extension.
    pub fn export(&self) -> Result<Vec<Artifact>> {
        let mut used: HashSet<String> = HashSet::with_capacity(self.history.len());

        self.history
            .iter()
            .map(|entry| {
                let mut artifact = entry.to_artifact()?;
                let mut copy = 1;
                while used.contains(&artifact.file_name) {
                    copy += 1;
                    artifact.file_name = format!("{} ({copy}).{ARTIFACT_EXTENSION}", entry.name);
                }
                used.insert(artifact.file_name.clone());
                Ok(artifact)
            })
            .collect()
    }

    fn push_entry(&mut self, entry: HistoryEntry) -> usize {
        self.pending_removal = None;
        self.history.push(entry);
        self.history.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryPayload;
    use crate::traits::Bitmap;

    fn store_with_entries(count: usize) -> GridStore {
        let mut store = GridStore::new();
        store.configure(1, count).unwrap();
        store.set_repetitions(1).unwrap();
        for col in 0..count {
            store.toggle(0, col, col, col).unwrap();
            store.commit(0, col).unwrap();
        }
        store
    }

    #[test]
    fn test_configure_replaces_grid_and_history() {
        let mut store = store_with_entries(2);
        assert_eq!(store.history().len(), 2);

        store.configure(3, 4).unwrap();
        assert_eq!(store.grid().shape(), (3, 4));
        assert!(store.history().is_empty());
        assert_eq!(store.grid().lit_count(), 0);
    }

    #[test]
    fn test_configure_rejects_oversized_grid() {
        let mut store = store_with_entries(2);
        let before_grid = store.grid().clone();

        assert_eq!(
            store.configure(6, 3),
            Err(LedMatrixError::SizeExceeded { rows: 6, cols: 3 })
        );
        assert_eq!(
            store.configure(3, 6),
            Err(LedMatrixError::SizeExceeded { rows: 3, cols: 6 })
        );
        assert_eq!(store.grid(), &before_grid);
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_toggle_twice_restores_cell() {
        let mut store = GridStore::new();
        store.configure(2, 2).unwrap();

        assert_eq!(store.toggle(1, 1, 4, 6), Ok(true));
        assert_eq!(store.sub_matrix(1, 1).unwrap().get(4, 6), Some(true));
        assert_eq!(store.toggle(1, 1, 4, 6), Ok(false));
        assert!(store.sub_matrix(1, 1).unwrap().is_blank());

        assert_eq!(store.toggle(2, 0, 0, 0), Err(LedMatrixError::IndexOutOfBounds));
        assert_eq!(store.toggle(0, 0, 8, 0), Err(LedMatrixError::IndexOutOfBounds));
    }

    #[test]
    fn test_commit_captures_current_pixels() {
        let mut store = GridStore::new();
        store.configure(1, 1).unwrap();
        store.set_repetitions(2).unwrap();
        store.toggle(0, 0, 7, 0).unwrap();

        let index = store.commit(0, 0).unwrap();
        assert_eq!(index, 0);

        // Later edits do not change the committed entry
        store.clear();
        let entry = &store.history()[0];
        assert_eq!(entry.name, "m1_1");
        assert_eq!(entry.byte_len(), Ok(16));
        let bytes = entry.to_bytes().unwrap();
        assert_eq!(bytes[0], 0x7F);
        assert_eq!(bytes[8], 0x7F);
        assert!(bytes[1..8].iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_commit_out_of_range() {
        let mut store = GridStore::new();
        store.configure(1, 1).unwrap();
        assert_eq!(store.commit(0, 1), Err(LedMatrixError::IndexOutOfBounds));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_commit_all_on_empty_grid() {
        let mut store = GridStore::new();
        store.configure(0, 3).unwrap();
        assert_eq!(store.commit_all(), Ok(0));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_configure_drops_pending_removal() {
        let mut store = store_with_entries(3);
        store.request_removal(1).unwrap();
        assert_eq!(store.pending_removal(), Some(1));

        store.configure(2, 2).unwrap();
        assert_eq!(store.pending_removal(), None);
        assert_eq!(store.confirm_removal(), Err(LedMatrixError::NoPendingRemoval));
    }

    #[test]
    fn test_commit_all_row_major() {
        let mut store = GridStore::new().with_naming(NamingScheme::Compact);
        store.configure(2, 2).unwrap();
        assert_eq!(store.commit_all(), Ok(4));

        let names: Vec<_> = store.history().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["m_11", "m_12", "m_21", "m_22"]);
    }

    #[test]
    fn test_repetitions() {
        let mut store = GridStore::new();
        assert_eq!(store.repetitions(), DEFAULT_REPETITIONS);
        assert_eq!(store.set_repetitions(0), Err(LedMatrixError::InvalidRepetitions));
        assert_eq!(store.repetitions(), DEFAULT_REPETITIONS);

        assert_eq!(store.set_repetitions_input("3"), 3);
        assert_eq!(store.set_repetitions_input("abc"), DEFAULT_REPETITIONS);
    }

    #[test]
    fn test_huge_repetitions_never_reach_history() {
        let mut store = GridStore::new();
        store.configure(1, 1).unwrap();

        assert_eq!(
            store.set_repetitions(usize::MAX / 4),
            Err(LedMatrixError::InvalidRepetitions)
        );
        assert_eq!(
            store.set_repetitions_input("3000000000000000000"),
            DEFAULT_REPETITIONS
        );

        store.commit(0, 0).unwrap();
        assert_eq!(store.history()[0].byte_len(), Ok(DEFAULT_REPETITIONS * 8));
        assert_eq!(store.export().unwrap()[0].bytes.len(), DEFAULT_REPETITIONS * 8);
    }

    #[test]
    fn test_confirmed_removal_keeps_order() {
        let mut store = store_with_entries(4);
        let original: Vec<_> = store.history().to_vec();

        assert_eq!(store.request_removal(2).unwrap().name, "m1_3");
        assert_eq!(store.pending_removal(), Some(2));
        let removed = store.confirm_removal().unwrap();
        assert_eq!(removed, original[2]);

        assert_eq!(
            store.history(),
            &[original[0].clone(), original[1].clone(), original[3].clone()]
        );
        assert_eq!(store.pending_removal(), None);
    }

    #[test]
    fn test_cancelled_removal() {
        let mut store = store_with_entries(4);
        store.request_removal(1).unwrap();
        assert_eq!(store.cancel_removal(), Some(1));
        assert_eq!(store.history().len(), 4);
        assert_eq!(store.confirm_removal(), Err(LedMatrixError::NoPendingRemoval));
    }

    #[test]
    fn test_removal_request_invalidated_by_mutation() {
        let mut store = store_with_entries(3);
        store.request_removal(2).unwrap();
        store.remove_last();
        assert_eq!(store.confirm_removal(), Err(LedMatrixError::NoPendingRemoval));

        store.request_removal(0).unwrap();
        store.commit(0, 0).unwrap();
        assert_eq!(store.pending_removal(), None);

        assert!(matches!(
            store.request_removal(10),
            Err(LedMatrixError::IndexOutOfBounds)
        ));
    }

    #[test]
    fn test_remove_and_remove_last() {
        let mut store = store_with_entries(3);
        assert_eq!(store.remove(5), Err(LedMatrixError::IndexOutOfBounds));
        assert_eq!(store.remove(0).unwrap().name, "m1_1");
        assert_eq!(store.remove_last().unwrap().name, "m1_3");
        assert_eq!(store.history().len(), 1);
        store.remove_last();
        assert_eq!(store.remove_last(), None);
    }

    #[test]
    fn test_clear_keeps_shape_and_history() {
        let mut store = store_with_entries(2);
        store.clear();
        assert_eq!(store.grid().shape(), (1, 2));
        assert_eq!(store.history().len(), 2);
        assert!(store.grid().iter().all(|(_, m)| m.is_blank()));
    }

    #[test]
    fn test_import_hex() {
        let mut store = GridStore::new();
        assert_eq!(store.import_hex("output", "FF FF AA FF 00 22 33"), Ok(0));
        match &store.history()[0].payload {
            HistoryPayload::Raw { bytes } => {
                assert_eq!(bytes, &[0xFF, 0xFF, 0xAA, 0xFF, 0x00, 0x22, 0x33])
            }
            other => panic!("unexpected payload {other:?}"),
        }

        assert_eq!(
            store.import_hex("../escape", "FF"),
            Err(LedMatrixError::InvalidEntryName)
        );
        assert_eq!(store.import_hex(" ", "FF"), Err(LedMatrixError::InvalidEntryName));
        assert_eq!(store.import_hex("bad", "XY"), Err(LedMatrixError::InvalidHexByte));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_export_names_and_duplicates() {
        let mut store = GridStore::new();
        store.configure(1, 2).unwrap();
        store.set_repetitions(1).unwrap();
        store.commit(0, 0).unwrap();
        store.commit(0, 1).unwrap();
        store.commit(0, 0).unwrap();
        store.commit(0, 0).unwrap();

        let artifacts = store.export().unwrap();
        let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(
            names,
            ["m1_1.bin", "m1_2.bin", "m1_1 (2).bin", "m1_1 (3).bin"]
        );
        assert!(artifacts.iter().all(|a| a.bytes == [0xFF; 8]));
    }

    #[test]
    fn test_export_empty_history() {
        let mut store = GridStore::new();
        store.configure(2, 2).unwrap();
        assert!(store.export().unwrap().is_empty());
    }
}
