//! LEDMX - LED Matrix Pattern Toolkit
//!
//! This library turns 8x8 LED sub-matrix patterns into the raw column
//! bytes expected by LED controllers and writes them to disk.
//!
//! ## Architecture
//!
//! - **ledmx-core**: Sub-matrix model, encoder, grid store and naming (no I/O)
//! - **ledmx**: Export to directories, design files, the editor shell and the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ledmx::{export_store, ExportConfig, GridStore};
//!
//! fn example() -> ledmx::Result<()> {
//!     let mut store = GridStore::new();
//!     store.configure(1, 2)?;
//!     store.toggle(0, 0, 7, 0)?;
//!     store.commit_all()?;
//!
//!     let report = export_store(&store, "out", &ExportConfig::default())?;
//!     println!("wrote {} files", report.written.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **serde** (default): JSON design files
//! - **async** (default): tokio export strategy
//! - **cli** (default): the `ledmx` binary with logging

pub use ledmx_core::{
    // Model
    GridConfig, GridPosition, GridStore, NamingScheme, SubMatrix,
    // History
    Artifact, HistoryEntry, HistoryPayload,
    // Encoding
    decode_blocks, encode, encode_columns, ColumnBytes, HexDump,
    // Traits
    ArtifactSink, Bitmap,
    // Error handling
    LedMatrixError,
};

pub mod error;
pub mod export;
pub mod preview;
pub mod shell;

#[cfg(feature = "serde")]
pub mod design;

#[cfg(feature = "cli")]
pub mod logging;

pub use error::{ExportError, Result};
pub use export::{
    export_artifacts, export_store, write_file, DirectoryExporter, ExportConfig, ExportReport,
    ExportStrategy, WriteFailure,
};
#[cfg(feature = "async")]
pub use export::export_artifacts_async;
pub use shell::Shell;

#[cfg(feature = "serde")]
pub use design::{CommitSelection, Design};
