//! Abstract interfaces for LED bitmaps and artifact output
//!
//! Traits here are pure interfaces. Concrete sinks that touch the
//! filesystem live in the `ledmx` crate.

pub mod bitmap;
#[cfg(feature = "alloc")]
pub mod sink;

pub use bitmap::Bitmap;
#[cfg(feature = "alloc")]
pub use sink::ArtifactSink;
