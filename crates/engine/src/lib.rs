//! Rules engine for shogi: board and hand state, per-piece move generation,
//! check and checkmate detection, and move execution with capture and
//! promotion. Captured pieces are kept in hand but never dropped back.

pub mod bitboard;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod hand;
pub mod move_gen;
pub mod movelist;
pub mod movement;
pub mod r#move;
pub mod rules;

pub use bitboard::{Bitboard, Board};
pub use config::Config;
pub use constants::{Piece, PieceKind, Player};
pub use error::{EngineError, MoveError, ParseMoveError, SfenError};
pub use game::{GameState, GameStatus, MoveOutcome};
pub use r#move::Move;
