//! File naming schemes for exported artifacts
//!
//! Encoded entries are named after the sub-matrix they came from, using
//! one-based coordinates. Two layouts exist in the wild, so both are kept.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::str::FromStr;

use super::constants::ARTIFACT_EXTENSION;
use super::position::GridPosition;
use crate::LedMatrixError;

/// How encoded history entries are turned into file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NamingScheme {
    /// `m_{row}{col}`, e.g. `m_12`
    Compact,
    /// `m{row}_{col}`, e.g. `m1_2`
    #[default]
    Separated,
}

impl NamingScheme {
    /// Entry name (file stem) for a sub-matrix position
    pub fn entry_name(self, position: GridPosition) -> String {
        let (row, col) = position.one_based();
        match self {
            NamingScheme::Compact => format!("m_{row}{col}"),
            NamingScheme::Separated => format!("m{row}_{col}"),
        }
    }

    /// Full file name for a sub-matrix position
    pub fn file_name(self, position: GridPosition) -> String {
        with_extension(&self.entry_name(position))
    }
}

/// Append the artifact extension to a stem
pub fn with_extension(stem: &str) -> String {
    format!("{stem}.{ARTIFACT_EXTENSION}")
}

impl FromStr for NamingScheme {
    type Err = LedMatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(NamingScheme::Compact),
            "separated" => Ok(NamingScheme::Separated),
            _ => Err(LedMatrixError::InvalidNamingScheme),
        }
    }
}

impl core::fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NamingScheme::Compact => write!(f, "compact"),
            NamingScheme::Separated => write!(f, "separated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_schemes() {
        let position = GridPosition::new(0, 1);
        assert_eq!(NamingScheme::Compact.file_name(position), "m_12.bin");
        assert_eq!(NamingScheme::Separated.file_name(position), "m1_2.bin");
        assert_eq!(NamingScheme::Separated.entry_name(GridPosition::new(4, 4)), "m5_5");
    }

    #[test]
    fn test_parse_naming_scheme() {
        assert_eq!("compact".parse(), Ok(NamingScheme::Compact));
        assert_eq!("separated".parse(), Ok(NamingScheme::Separated));
        assert_eq!(
            "m_rc".parse::<NamingScheme>(),
            Err(LedMatrixError::InvalidNamingScheme)
        );
    }
}
