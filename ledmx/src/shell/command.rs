//! Command line parsing for the editor shell
//!
//! Grid positions, pixel coordinates and history indices are typed
//! one-based, the same way they are shown to the user.

use std::path::PathBuf;

use ledmx_core::validation::parse_usize;
use ledmx_core::{GridPosition, LedMatrixError, NamingScheme};
use thiserror::Error;

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Configure { rows: usize, cols: usize },
    Toggle {
        position: GridPosition,
        row: usize,
        col: usize,
    },
    Repetitions(String),
    Commit(GridPosition),
    CommitAll,
    Remove(usize),
    RemoveLast,
    Clear,
    Show(Option<GridPosition>),
    History,
    Hex { name: String, bytes: String },
    Naming(NamingScheme),
    Export(PathBuf),
    Help,
    Quit,
}

/// Reasons a line could not be turned into a command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(#[from] LedMatrixError),
}

pub const HELP: &str = "\
configure R C         replace the grid with R x C blank sub-matrices
toggle SR SC PR PC    flip one pixel
reps N                repetitions for the next commit (blank or 0 means 10)
commit SR SC          encode one sub-matrix into history
commit all            encode every sub-matrix, row by row
remove I              remove history entry I after confirmation
remove last           remove the newest history entry
clear                 switch every pixel off
show [SR SC]          draw the grid or one sub-matrix
history               list history entries
hex NAME BYTES...     add a literal byte sequence, e.g. hex output FF AA 00
naming compact|separated
export DIR            write every history entry to DIR
help                  show this text
quit                  leave the shell";

impl Command {
    /// Parse one input line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (keyword.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("configure", [rows, cols]) => Command::Configure {
                rows: parse_usize(rows)?,
                cols: parse_usize(cols)?,
            },
            ("configure", _) => return Err(CommandError::Usage("configure R C")),

            ("toggle", [super_row, super_col, row, col]) => Command::Toggle {
                position: position(super_row, super_col)?,
                row: one_based(row)?,
                col: one_based(col)?,
            },
            ("toggle", _) => return Err(CommandError::Usage("toggle SR SC PR PC")),

            ("reps", rest) => Command::Repetitions(rest.join(" ")),

            ("commit", ["all"]) => Command::CommitAll,
            ("commit", [super_row, super_col]) => Command::Commit(position(super_row, super_col)?),
            ("commit", _) => return Err(CommandError::Usage("commit SR SC | commit all")),

            ("remove", ["last"]) => Command::RemoveLast,
            ("remove", [index]) => Command::Remove(one_based(index)?),
            ("remove", _) => return Err(CommandError::Usage("remove I | remove last")),

            ("clear", []) => Command::Clear,

            ("show", []) => Command::Show(None),
            ("show", [super_row, super_col]) => Command::Show(Some(position(super_row, super_col)?)),
            ("show", _) => return Err(CommandError::Usage("show [SR SC]")),

            ("history", []) => Command::History,

            ("hex", [name, bytes @ ..]) if !bytes.is_empty() => Command::Hex {
                name: name.to_string(),
                bytes: bytes.join(" "),
            },
            ("hex", _) => return Err(CommandError::Usage("hex NAME BYTES...")),

            ("naming", [scheme]) => Command::Naming(scheme.parse()?),
            ("naming", _) => return Err(CommandError::Usage("naming compact|separated")),

            ("export", [dir]) => Command::Export(PathBuf::from(dir)),
            ("export", _) => return Err(CommandError::Usage("export DIR")),

            ("help", _) | ("?", _) => Command::Help,
            ("quit", _) | ("exit", _) => Command::Quit,

            _ => return Err(CommandError::Unknown(keyword.to_string())),
        };
        Ok(Some(command))
    }
}

fn one_based(token: &str) -> Result<usize, LedMatrixError> {
    parse_usize(token)?
        .checked_sub(1)
        .ok_or(LedMatrixError::IndexOutOfBounds)
}

fn position(row: &str, col: &str) -> Result<GridPosition, LedMatrixError> {
    Ok(GridPosition::new(one_based(row)?, one_based(col)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_one_based_coordinates() {
        assert_eq!(
            parse("toggle 1 2 8 1"),
            Command::Toggle {
                position: GridPosition::new(0, 1),
                row: 7,
                col: 0,
            }
        );
        assert_eq!(parse("commit 2 3"), Command::Commit(GridPosition::new(1, 2)));
        assert_eq!(parse("remove 3"), Command::Remove(2));
        assert_eq!(parse("configure 0 4"), Command::Configure { rows: 0, cols: 4 });
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse("commit all"), Command::CommitAll);
        assert_eq!(parse("remove last"), Command::RemoveLast);
        assert_eq!(parse("  SHOW  "), Command::Show(None));
        assert_eq!(parse("naming compact"), Command::Naming(NamingScheme::Compact));
        assert_eq!(parse("reps"), Command::Repetitions(String::new()));
        assert_eq!(
            parse("hex output FF 0xAA 0"),
            Command::Hex {
                name: "output".to_string(),
                bytes: "FF 0xAA 0".to_string(),
            }
        );
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# note").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("toggle 0 1 1 1"),
            Err(CommandError::Invalid(LedMatrixError::IndexOutOfBounds))
        );
        assert_eq!(
            Command::parse("configure 2"),
            Err(CommandError::Usage("configure R C"))
        );
        assert_eq!(
            Command::parse("configure two 2"),
            Err(CommandError::Invalid(LedMatrixError::InvalidNumber))
        );
        assert_eq!(
            Command::parse("hex name"),
            Err(CommandError::Usage("hex NAME BYTES..."))
        );
        assert_eq!(
            Command::parse("naming other"),
            Err(CommandError::Invalid(LedMatrixError::InvalidNamingScheme))
        );
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
