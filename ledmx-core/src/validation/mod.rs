//! Input validation for grid editing
//!
//! Pure functions with no I/O dependencies: grid bounds checks and the
//! small text formats used for pixel rows and hex byte sequences.

pub mod bounds;
pub mod parsing;

pub use bounds::{validate_grid_size, validate_pixel, validate_position};
pub use parsing::{parse_hex_byte, parse_pixel_row, parse_repetitions_input, parse_usize};
#[cfg(feature = "alloc")]
pub use parsing::parse_hex_sequence;
