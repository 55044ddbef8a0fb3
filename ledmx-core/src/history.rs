//! History entries and exported artifacts
//!
//! Every entry in the history list is a named [`HistoryPayload`]. Encoded
//! payloads keep the column bytes and the repetition count captured at
//! commit time, so later edits to the grid never change an entry. Raw
//! payloads carry a literal byte sequence imported from hex text.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::encoder::{validate_repetitions, ColumnBytes};
use crate::format::constants::BYTES_PER_BLOCK;
use crate::format::naming::with_extension;
use crate::format::GridPosition;
use crate::{LedMatrixError, Result};

/// Contents of one history entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum HistoryPayload {
    /// Columns of one sub-matrix, repeated on export
    Encoded {
        /// Sub-matrix the columns were taken from
        position: GridPosition,
        /// Column bytes at commit time
        columns: ColumnBytes,
        /// Number of times the columns are repeated
        repetitions: usize,
    },
    /// Literal byte sequence
    Raw {
        /// Bytes written verbatim
        bytes: Vec<u8>,
    },
}

/// Named, exportable unit in the history list
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EntryParts"))]
pub struct HistoryEntry {
    /// Display name, also the exported file stem
    pub name: String,
    /// What the entry exports
    pub payload: HistoryPayload,
}

/// Unchecked serialized form of an entry
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct EntryParts {
    name: String,
    payload: HistoryPayload,
}

#[cfg(feature = "serde")]
impl TryFrom<EntryParts> for HistoryEntry {
    type Error = LedMatrixError;

    fn try_from(parts: EntryParts) -> Result<Self> {
        validate_entry_name(&parts.name)?;
        if let HistoryPayload::Encoded { repetitions, .. } = &parts.payload {
            validate_repetitions(*repetitions)?;
        }
        Ok(Self {
            name: parts.name,
            payload: parts.payload,
        })
    }
}

/// Reject names that are empty or could escape the export directory
pub(crate) fn validate_entry_name(name: &str) -> Result<()> {
    let forbidden = |ch: char| matches!(ch, '/' | '\\' | ':' | '\0') || ch.is_control();
    if name.trim().is_empty() || name.contains(forbidden) || name == "." || name == ".." {
        return Err(LedMatrixError::InvalidEntryName);
    }
    Ok(())
}

impl HistoryEntry {
    /// Create an encoded entry
    pub fn encoded(
        name: String,
        position: GridPosition,
        columns: ColumnBytes,
        repetitions: usize,
    ) -> Result<Self> {
        validate_repetitions(repetitions)?;
        Ok(Self {
            name,
            payload: HistoryPayload::Encoded {
                position,
                columns,
                repetitions,
            },
        })
    }

    /// Create a raw entry
    pub fn raw(name: String, bytes: Vec<u8>) -> Self {
        Self {
            name,
            payload: HistoryPayload::Raw { bytes },
        }
    }

    /// Number of bytes this entry exports
    ///
    /// Encoded payloads are checked again here since their fields are public.
    pub fn byte_len(&self) -> Result<usize> {
        match &self.payload {
            HistoryPayload::Encoded { repetitions, .. } => {
                let repetitions = validate_repetitions(*repetitions)?;
                repetitions
                    .checked_mul(BYTES_PER_BLOCK)
                    .ok_or(LedMatrixError::InvalidRepetitions)
            }
            HistoryPayload::Raw { bytes } => Ok(bytes.len()),
        }
    }

    /// Bytes this entry exports
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match &self.payload {
            HistoryPayload::Encoded {
                columns,
                repetitions,
                ..
            } => columns.repeat(*repetitions),
            HistoryPayload::Raw { bytes } => Ok(bytes.clone()),
        }
    }

    /// Build the artifact for this entry using its own name
    pub fn to_artifact(&self) -> Result<Artifact> {
        Ok(Artifact {
            file_name: with_extension(&self.name),
            bytes: self.to_bytes()?,
        })
    }
}

/// A named byte sequence ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name including extension
    pub file_name: String,
    /// Raw bytes, no header
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_columns;
    use crate::SubMatrix;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_encoded_entry_bytes() {
        let columns = encode_columns(&SubMatrix::filled(true));
        let entry =
            HistoryEntry::encoded("m1_1".to_string(), GridPosition::new(0, 0), columns, 3).unwrap();

        assert_eq!(entry.byte_len(), Ok(24));
        assert_eq!(entry.to_bytes().unwrap(), vec![0u8; 24]);

        let artifact = entry.to_artifact().unwrap();
        assert_eq!(artifact.file_name, "m1_1.bin");
        assert_eq!(artifact.bytes.len(), 24);
    }

    #[test]
    fn test_encoded_entry_rejects_zero_repetitions() {
        let result = HistoryEntry::encoded(
            "m1_1".to_string(),
            GridPosition::new(0, 0),
            ColumnBytes::BLANK,
            0,
        );
        assert_eq!(result, Err(LedMatrixError::InvalidRepetitions));
    }

    #[test]
    fn test_hand_built_payload_with_huge_repetitions() {
        let entry = HistoryEntry {
            name: "m1_1".to_string(),
            payload: HistoryPayload::Encoded {
                position: GridPosition::new(0, 0),
                columns: ColumnBytes::BLANK,
                repetitions: usize::MAX / 4,
            },
        };
        assert_eq!(entry.byte_len(), Err(LedMatrixError::InvalidRepetitions));
        assert_eq!(entry.to_bytes(), Err(LedMatrixError::InvalidRepetitions));
        assert!(entry.to_artifact().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_entries() {
        let entry = HistoryEntry::raw("output".to_string(), vec![0xFF, 0x00]);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(serde_json::from_str::<HistoryEntry>(&json).unwrap(), entry);

        let zero_reps = r#"{"name":"m1_1","payload":{"kind":"encoded",
            "position":{"row":0,"col":0},"columns":[255,255,255,255,255,255,255,255],
            "repetitions":0}}"#;
        assert!(serde_json::from_str::<HistoryEntry>(zero_reps).is_err());

        let escaping = r#"{"name":"../m1_1","payload":{"kind":"raw","bytes":[1]}}"#;
        assert!(serde_json::from_str::<HistoryEntry>(escaping).is_err());
    }

    #[test]
    fn test_raw_entry_bytes() {
        let entry = HistoryEntry::raw("output".to_string(), vec![0xFF, 0xAA, 0x00]);
        assert_eq!(entry.byte_len(), Ok(3));
        assert_eq!(entry.to_artifact().unwrap().file_name, "output.bin");
        assert_eq!(entry.to_bytes().unwrap(), vec![0xFF, 0xAA, 0x00]);
    }
}
