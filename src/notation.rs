//! Decoding of human move notation such as `"c 7"` into board coordinates.
//!
//! The row is one of the first ten letters (`a` = row 0 … `j` = row 9), the
//! column a single digit. Case is ignored, and whitespace may appear around
//! and between the two parts. This lives outside the engine: the engine only
//! ever sees integer coordinates.

use core::fmt;

use crate::common::Coord;
use crate::config::BOARD_SIZE;

/// Errors returned when a move string is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationError {
    /// Nothing but whitespace.
    Empty,
    /// The row part is not one of `a`..`j`.
    InvalidRow(char),
    /// The column part is missing or not a digit.
    InvalidColumn,
    /// Extra characters after the column.
    TrailingInput,
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Empty => write!(f, "Empty move"),
            NotationError::InvalidRow(c) => write!(f, "Row '{}' is not a letter from a to j", c),
            NotationError::InvalidColumn => write!(f, "Column must be a digit from 0 to 9"),
            NotationError::TrailingInput => write!(f, "Unexpected characters after the column"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NotationError {}

/// Row index for a row letter, `a` → 0.
pub fn row_index(letter: char) -> Option<usize> {
    let lower = letter.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        let idx = (lower as u8 - b'a') as usize;
        (idx < BOARD_SIZE).then_some(idx)
    } else {
        None
    }
}

/// Row letter for a row index, 0 → `a`.
pub fn row_letter(row: usize) -> Option<char> {
    (row < BOARD_SIZE).then(|| (b'a' + row as u8) as char)
}

/// Decode a move into `(x, y)`: `x` from the digit, `y` from the letter.
pub fn decode(input: &str) -> Result<Coord, NotationError> {
    let mut chars = input.chars().filter(|c| !c.is_whitespace());
    let letter = chars.next().ok_or(NotationError::Empty)?;
    let y = row_index(letter).ok_or(NotationError::InvalidRow(letter))?;
    let x = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or(NotationError::InvalidColumn)? as usize;
    if chars.next().is_some() {
        return Err(NotationError::TrailingInput);
    }
    Ok((x, y))
}

/// Encode `(x, y)` back into canonical notation, e.g. `"c7"`.
pub fn encode(x: usize, y: usize) -> Option<alloc::string::String> {
    use alloc::string::ToString;
    let letter = row_letter(y)?;
    if x >= BOARD_SIZE {
        return None;
    }
    let mut out = letter.to_string();
    out.push(char::from(b'0' + x as u8));
    Some(out)
}
