//! Layout definitions for LED sub-matrix grids and exported artifacts
//!
//! Constants, grid addressing and the file naming schemes used when
//! history entries are written out. No I/O happens here.

pub mod constants;
#[cfg(feature = "alloc")]
pub mod naming;
pub mod position;

#[cfg(feature = "alloc")]
pub use naming::NamingScheme;
pub use position::GridPosition;
