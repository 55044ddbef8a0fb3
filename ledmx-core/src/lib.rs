#![no_std]

//! LEDMX Core - LED Sub-Matrix Model and Bitmap Encoding
//!
//! This crate provides the pure pieces of the LED pattern toolkit: the
//! 8x8 sub-matrix type, the column encoder, grid and history state and
//! the artifact naming rules. It performs no I/O.
//!
//! Without the `alloc` feature only the sub-matrix, encoder and
//! validation helpers are available.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod encoder;
pub mod error;
pub mod format;
#[cfg(feature = "alloc")]
pub mod grid;
#[cfg(feature = "alloc")]
pub mod history;
#[cfg(feature = "alloc")]
pub mod store;
pub mod sub_matrix;
pub mod traits;
pub mod validation;

pub use encoder::{decode_columns, encode_columns, encode_into, ColumnBytes, HexDump};
#[cfg(feature = "alloc")]
pub use encoder::{decode_blocks, encode, encode_rows};
pub use error::*;
pub use format::constants::*;
pub use format::GridPosition;
#[cfg(feature = "alloc")]
pub use format::NamingScheme;
#[cfg(feature = "alloc")]
pub use grid::GridConfig;
#[cfg(feature = "alloc")]
pub use history::{Artifact, HistoryEntry, HistoryPayload};
#[cfg(feature = "alloc")]
pub use store::GridStore;
pub use sub_matrix::{PixelRows, SubMatrix};
pub use traits::*;
