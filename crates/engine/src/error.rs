//! Error types for the shogi engine.
//!
//! Every error here is recoverable: the engine reports it and leaves the game
//! untouched, so callers can simply retry with new input.

use crate::constants::{PieceKind, Player};
use thiserror::Error;

/// Malformed `"RC-RC"` move notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected exactly one '-' separator in {0:?}")]
    Separator(String),

    #[error("square {0:?} must be a file digit followed by a rank digit")]
    SquareLength(String),

    #[error("non-digit character {0:?} in move")]
    NonDigit(char),

    #[error("digit {0} is out of range 1-9")]
    OutOfRange(u32),
}

/// Reasons a move is rejected by the executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("square index {square} is off the board")]
    OffBoard { square: usize },

    #[error("no piece at square {square}")]
    NoPieceAtSquare { square: usize },

    #[error("piece at square {square} does not belong to {player:?}")]
    WrongOwner { square: usize, player: Player },

    #[error("piece at square {from} cannot reach square {to}")]
    Unreachable { from: usize, to: usize },

    #[error("moving from {from} to {to} leaves the {player:?} king in check")]
    ExposesKing { from: usize, to: usize, player: Player },

    #[error("the king on square {square} cannot be captured")]
    KingCapture { square: usize },
}

/// Malformed position strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SfenError {
    #[error("expected 4 whitespace separated fields, found {0}")]
    FieldCount(usize),

    #[error("expected 9 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {row} spans {count} files instead of 9")]
    FileCount { row: usize, count: usize },

    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("piece {0:?} cannot be promoted")]
    NotPromotable(char),

    #[error("{player:?} has {count} kings on the board")]
    KingCount { player: Player, count: usize },

    #[error("invalid side to move {0:?}")]
    SideToMove(String),

    #[error("invalid hand field {0:?}")]
    Hand(String),

    #[error("invalid move number {0:?}")]
    MoveNumber(String),

    #[error("{count} {kind:?} pieces in play, a full set has {max}")]
    PieceCount { kind: PieceKind, count: usize, max: usize },

    #[error("{0:?} is in check with the other side to move")]
    WaitingSideInCheck(Player),
}

/// Umbrella error for entry points that parse and execute in one call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseMoveError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Sfen(#[from] SfenError),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
