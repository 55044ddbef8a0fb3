//! Parsing utilities for pixel rows, hex bytes and numeric input
//!
//! Parsing is done by hand so the functions stay available without std.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::format::constants::{pattern, DEFAULT_REPETITIONS, MAX_REPETITIONS, SUB_MATRIX_SIZE};
use crate::LedMatrixError;

/// Parse a non-negative decimal number
pub fn parse_usize(s: &str) -> Result<usize, LedMatrixError> {
    if s.is_empty() {
        return Err(LedMatrixError::InvalidNumber);
    }

    let mut result: usize = 0;
    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(LedMatrixError::InvalidNumber);
        }

        let digit = (byte - b'0') as usize;
        result = result
            .checked_mul(10)
            .and_then(|value| value.checked_add(digit))
            .ok_or(LedMatrixError::InvalidNumber)?;
    }

    Ok(result)
}

/// Interpret a repetitions input field
///
/// Empty, unparsable, zero or oversized input falls back to the default
/// count, the same way the editor form treats a cleared field.
pub fn parse_repetitions_input(s: &str) -> usize {
    match parse_usize(s.trim()) {
        Ok(repetitions) if (1..=MAX_REPETITIONS).contains(&repetitions) => repetitions,
        _ => DEFAULT_REPETITIONS,
    }
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Parse one hex byte token such as `FF`, `7f`, `0x0A` or `a`
pub fn parse_hex_byte(token: &str) -> Result<u8, LedMatrixError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    match digits.as_bytes() {
        [low] => hex_digit(*low).ok_or(LedMatrixError::InvalidHexByte),
        [high, low] => match (hex_digit(*high), hex_digit(*low)) {
            (Some(high), Some(low)) => Ok((high << 4) | low),
            _ => Err(LedMatrixError::InvalidHexByte),
        },
        _ => Err(LedMatrixError::InvalidHexByte),
    }
}

/// Parse a whitespace-separated hex byte sequence such as `"FF FF AA 00"`
///
/// An empty sequence is rejected.
#[cfg(feature = "alloc")]
pub fn parse_hex_sequence(text: &str) -> Result<Vec<u8>, LedMatrixError> {
    let bytes = text
        .split_whitespace()
        .map(parse_hex_byte)
        .collect::<Result<Vec<_>, _>>()?;

    if bytes.is_empty() {
        return Err(LedMatrixError::InvalidHexByte);
    }
    Ok(bytes)
}

/// Parse an eight character pixel row such as `"#..#...."`
///
/// `#`, `X`, `x` and `1` mark a lit pixel; `.`, `-`, `0` and `_` an unlit one.
pub fn parse_pixel_row(text: &str) -> Result<[bool; SUB_MATRIX_SIZE], LedMatrixError> {
    let mut row = [false; SUB_MATRIX_SIZE];
    let mut count = 0;

    for ch in text.chars() {
        let on = if pattern::ON_CHARS.contains(&ch) {
            true
        } else if pattern::OFF_CHARS.contains(&ch) {
            false
        } else {
            return Err(LedMatrixError::InvalidPixelRow);
        };

        let cell = row.get_mut(count).ok_or(LedMatrixError::InvalidPixelRow)?;
        *cell = on;
        count += 1;
    }

    if count != SUB_MATRIX_SIZE {
        return Err(LedMatrixError::InvalidPixelRow);
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_usize() {
        assert_eq!(parse_usize("0"), Ok(0));
        assert_eq!(parse_usize("123"), Ok(123));

        // Invalid cases
        assert_eq!(parse_usize(""), Err(LedMatrixError::InvalidNumber));
        assert_eq!(parse_usize("abc"), Err(LedMatrixError::InvalidNumber));
        assert_eq!(parse_usize("-3"), Err(LedMatrixError::InvalidNumber));
        assert_eq!(
            parse_usize("99999999999999999999999"),
            Err(LedMatrixError::InvalidNumber)
        );
    }

    #[test]
    fn test_parse_repetitions_input() {
        assert_eq!(parse_repetitions_input("4"), 4);
        assert_eq!(parse_repetitions_input(" 12 "), 12);
        assert_eq!(parse_repetitions_input(""), DEFAULT_REPETITIONS);
        assert_eq!(parse_repetitions_input("0"), DEFAULT_REPETITIONS);
        assert_eq!(parse_repetitions_input("many"), DEFAULT_REPETITIONS);
        assert_eq!(parse_repetitions_input("3000000000000000000"), DEFAULT_REPETITIONS);
        assert_eq!(parse_repetitions_input("1048576"), MAX_REPETITIONS);
    }

    #[test]
    fn test_parse_hex_byte() {
        assert_eq!(parse_hex_byte("FF"), Ok(0xFF));
        assert_eq!(parse_hex_byte("7f"), Ok(0x7F));
        assert_eq!(parse_hex_byte("0x0A"), Ok(0x0A));
        assert_eq!(parse_hex_byte("a"), Ok(0x0A));

        assert_eq!(parse_hex_byte(""), Err(LedMatrixError::InvalidHexByte));
        assert_eq!(parse_hex_byte("GG"), Err(LedMatrixError::InvalidHexByte));
        assert_eq!(parse_hex_byte("100"), Err(LedMatrixError::InvalidHexByte));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_parse_hex_sequence() {
        assert_eq!(
            parse_hex_sequence("FF FF AA FF 00 22 33"),
            Ok(alloc::vec![0xFF, 0xFF, 0xAA, 0xFF, 0x00, 0x22, 0x33])
        );
        assert_eq!(parse_hex_sequence("  01\t02\n"), Ok(alloc::vec![1, 2]));
        assert_eq!(parse_hex_sequence("   "), Err(LedMatrixError::InvalidHexByte));
        assert_eq!(parse_hex_sequence("FF ZZ"), Err(LedMatrixError::InvalidHexByte));
    }

    #[test]
    fn test_parse_pixel_row() {
        assert_eq!(
            parse_pixel_row("#..#...."),
            Ok([true, false, false, true, false, false, false, false])
        );
        assert_eq!(parse_pixel_row("XXXXxxxx"), Ok([true; 8]));
        assert_eq!(parse_pixel_row("0000_---"), Ok([false; 8]));

        assert_eq!(parse_pixel_row("#######"), Err(LedMatrixError::InvalidPixelRow));
        assert_eq!(parse_pixel_row("#########"), Err(LedMatrixError::InvalidPixelRow));
        assert_eq!(parse_pixel_row("#.#.#.#?"), Err(LedMatrixError::InvalidPixelRow));
    }
}
