//! Error types for export, design files and the editor shell

use std::path::PathBuf;

use ledmx_core::LedMatrixError;
use thiserror::Error;

/// Errors surfaced by the `ledmx` front end
#[derive(Debug, Error)]
pub enum ExportError {
    /// Editing or encoding rejected the input
    #[error("{0}")]
    Core(#[from] LedMatrixError),

    /// The export target cannot receive files
    #[error("Cannot export to '{}': {reason}", path.display())]
    UnsupportedEnvironment { path: PathBuf, reason: String },

    /// Writing one artifact failed
    #[error("Failed to write '{file_name}': {source}")]
    WriteFailure {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    /// Some artifacts of a batch failed to write
    #[error("{failed} of {total} files failed to export")]
    PartialExport { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Design file could not be parsed or written
    #[cfg(feature = "serde")]
    #[error("Invalid design file: {0}")]
    Design(#[from] serde_json::Error),

    /// Async export task did not complete
    #[cfg(feature = "async")]
    #[error("Export task failed: {0}")]
    Runtime(#[from] tokio::task::JoinError),
}

/// Result type for `ledmx` operations
pub type Result<T> = std::result::Result<T, ExportError>;
