//! Defines the representation of a move in the engine, and its `"RC-RC"`
//! text notation.

use crate::bitboard::{col_of, row_of, sq_to_idx};
use crate::constants::{BOARD_FILES, NUM_SQUARES};
use crate::error::ParseMoveError;
use std::fmt;
use std::str::FromStr;

/// Represents a single board move.
///
/// A move is encoded as a 16-bit integer:
/// - Bits 0-6:   from_sq (0-80)
/// - Bits 7-13:  to_sq (0-80)
/// - Bit 14:     promotion requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

const PROMOTE_FLAG: u16 = 1 << 14;

impl Move {
    /// Creates a new move.
    pub fn new(from_sq: usize, to_sq: usize, promote: bool) -> Self {
        debug_assert!(from_sq < NUM_SQUARES && to_sq < NUM_SQUARES);
        let mut move_val = (from_sq as u16) | ((to_sq as u16) << 7);
        if promote {
            move_val |= PROMOTE_FLAG;
        }
        Move(move_val)
    }

    /// Gets the source square.
    pub fn from_sq(&self) -> usize {
        (self.0 & 0x7F) as usize
    }

    /// Gets the destination square.
    pub fn to_sq(&self) -> usize {
        ((self.0 >> 7) & 0x7F) as usize
    }

    pub fn is_promotion(&self) -> bool {
        self.0 & PROMOTE_FLAG != 0
    }

    /// The same move with the promotion request set or cleared.
    pub fn with_promotion(self, promote: bool) -> Self {
        Move::new(self.from_sq(), self.to_sq(), promote)
    }

    /// Renders the move as `"RC-RC"`, file digit then rank digit. The
    /// promotion request is not part of the notation.
    pub fn to_notation(&self) -> String {
        format!("{}-{}", square_notation(self.from_sq()), square_notation(self.to_sq()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parses `"RC-RC"` into a non-promoting move.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(ParseMoveError::Separator(s.to_string()));
        }
        let from_sq = parse_square(parts[0])?;
        let to_sq = parse_square(parts[1])?;
        Ok(Move::new(from_sq, to_sq, false))
    }
}

/// Parses a two-digit square, file then rank. File 9 is column 0 and rank 1
/// is row 0.
pub fn parse_square(s: &str) -> Result<usize, ParseMoveError> {
    let mut digits = [0; 2];
    let mut count = 0;
    for ch in s.chars() {
        if count == 2 {
            return Err(ParseMoveError::SquareLength(s.to_string()));
        }
        let digit = ch.to_digit(10).ok_or(ParseMoveError::NonDigit(ch))?;
        if !(1..=9).contains(&digit) {
            return Err(ParseMoveError::OutOfRange(digit));
        }
        digits[count] = digit as usize;
        count += 1;
    }
    if count != 2 {
        return Err(ParseMoveError::SquareLength(s.to_string()));
    }
    let [file, rank] = digits;
    Ok(sq_to_idx(rank - 1, BOARD_FILES - file))
}

/// The two-digit name of a square, e.g. `"77"` for row 6, column 2.
pub fn square_notation(sq: usize) -> String {
    format!("{}{}", BOARD_FILES - col_of(sq), row_of(sq) + 1)
}
