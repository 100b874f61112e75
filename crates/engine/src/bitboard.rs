//! The core board representation for the shogi engine.
//!
//! Squares are indexed `row * 9 + col`, row 0 being Gote's back rank and
//! column 0 being file 9. Occupancy per player is kept as a `u128` set so move
//! generation can work with masks.

use crate::constants::{BOARD_FILES, BOARD_RANKS, NUM_SQUARES, Piece, PieceKind, Player};
use crate::error::SfenError;
use std::fmt;

pub type Bitboard = u128;

// --- Pre-computed Masks ---
pub const SQUARE_MASKS: [Bitboard; NUM_SQUARES] = {
    let mut masks = [0; NUM_SQUARES];
    let mut i = 0;
    while i < NUM_SQUARES {
        masks[i] = 1 << i;
        i += 1;
    }
    masks
};

pub const RANK_MASKS: [Bitboard; BOARD_RANKS] = {
    let mut masks = [0; BOARD_RANKS];
    let mut i = 0;
    while i < BOARD_RANKS {
        masks[i] = 0x1FF << (i * BOARD_FILES);
        i += 1;
    }
    masks
};

pub const fn sq_to_idx(row: usize, col: usize) -> usize {
    row * BOARD_FILES + col
}

pub const fn row_of(sq: usize) -> usize {
    sq / BOARD_FILES
}

pub const fn col_of(sq: usize) -> usize {
    sq % BOARD_FILES
}

/// Iterates the squares of a bitboard in ascending index order.
pub fn squares(bb: Bitboard) -> SquareIter {
    SquareIter(bb)
}

#[derive(Debug, Clone)]
pub struct SquareIter(Bitboard);

impl Iterator for SquareIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let sq = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = popcount(self.0) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SquareIter {}

const INITIAL_BACK_RANK: [PieceKind; BOARD_FILES] = [
    PieceKind::Lance,
    PieceKind::Knight,
    PieceKind::Silver,
    PieceKind::Gold,
    PieceKind::King,
    PieceKind::Gold,
    PieceKind::Silver,
    PieceKind::Knight,
    PieceKind::Lance,
];

/// A 9×9 grid of optional pieces plus per-player occupancy sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [Option<Piece>; NUM_SQUARES],
    pub color_bitboards: [Bitboard; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            squares: [None; NUM_SQUARES],
            color_bitboards: [0; 2],
        }
    }

    /// The standard opening layout.
    pub fn initial() -> Self {
        let mut board = Board::new();
        for (col, &kind) in INITIAL_BACK_RANK.iter().enumerate() {
            board.set_piece(sq_to_idx(0, col), Piece::new(kind, Player::Gote));
            board.set_piece(sq_to_idx(8, col), Piece::new(kind, Player::Sente));
            board.set_piece(sq_to_idx(2, col), Piece::new(PieceKind::Pawn, Player::Gote));
            board.set_piece(sq_to_idx(6, col), Piece::new(PieceKind::Pawn, Player::Sente));
        }
        board.set_piece(sq_to_idx(1, 1), Piece::new(PieceKind::Rook, Player::Gote));
        board.set_piece(sq_to_idx(1, 7), Piece::new(PieceKind::Bishop, Player::Gote));
        board.set_piece(sq_to_idx(7, 1), Piece::new(PieceKind::Bishop, Player::Sente));
        board.set_piece(sq_to_idx(7, 7), Piece::new(PieceKind::Rook, Player::Sente));
        board
    }

    /// Parses the board field of a position string, e.g.
    /// `lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL`.
    pub fn from_sfen_layout(layout: &str) -> Result<Self, SfenError> {
        let mut board = Board::new();
        let ranks: Vec<&str> = layout.split('/').collect();
        if ranks.len() != BOARD_RANKS {
            return Err(SfenError::RankCount(ranks.len()));
        }

        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            let mut promoted = false;
            for ch in rank.chars() {
                if ch == '+' {
                    if promoted {
                        return Err(SfenError::UnexpectedChar(ch));
                    }
                    promoted = true;
                    continue;
                }
                if let Some(digit) = ch.to_digit(10) {
                    if promoted || digit == 0 {
                        return Err(SfenError::UnexpectedChar(ch));
                    }
                    col += digit as usize;
                    continue;
                }
                let kind = PieceKind::from_sfen_char(ch).ok_or(SfenError::UnexpectedChar(ch))?;
                if promoted && !kind.is_promotable() {
                    return Err(SfenError::NotPromotable(ch));
                }
                if col >= BOARD_FILES {
                    return Err(SfenError::FileCount { row, count: col + 1 });
                }
                let owner = if ch.is_ascii_uppercase() { Player::Sente } else { Player::Gote };
                board.set_piece(sq_to_idx(row, col), Piece { kind, owner, promoted });
                promoted = false;
                col += 1;
            }
            if promoted {
                return Err(SfenError::UnexpectedChar('+'));
            }
            if col != BOARD_FILES {
                return Err(SfenError::FileCount { row, count: col });
            }
        }

        for player in [Player::Sente, Player::Gote] {
            let kings = board.count_pieces(player, PieceKind::King);
            if kings != 1 {
                return Err(SfenError::KingCount { player, count: kings });
            }
        }

        Ok(board)
    }

    /// Renders the board field of a position string.
    pub fn to_sfen_layout(&self) -> String {
        let mut layout = String::with_capacity(96);
        for row in 0..BOARD_RANKS {
            let mut empty_count = 0;
            for col in 0..BOARD_FILES {
                match self.squares[sq_to_idx(row, col)] {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            layout.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        layout.push_str(&piece.to_sfen_string());
                    }
                }
            }
            if empty_count > 0 {
                layout.push_str(&empty_count.to_string());
            }
            if row < BOARD_RANKS - 1 {
                layout.push('/');
            }
        }
        layout
    }

    pub fn piece_at(&self, sq: usize) -> Option<Piece> {
        self.squares.get(sq).copied().flatten()
    }

    /// Places `piece` on an empty square.
    pub fn set_piece(&mut self, sq: usize, piece: Piece) {
        debug_assert!(self.squares[sq].is_none(), "square {sq} already occupied");
        self.squares[sq] = Some(piece);
        self.color_bitboards[piece.owner.index()] |= SQUARE_MASKS[sq];
    }

    pub fn remove_piece(&mut self, sq: usize) -> Option<Piece> {
        let piece = self.squares[sq].take()?;
        self.color_bitboards[piece.owner.index()] &= !SQUARE_MASKS[sq];
        Some(piece)
    }

    pub fn occupied_bitboard(&self) -> Bitboard {
        self.color_bitboards[0] | self.color_bitboards[1]
    }

    pub fn player_bitboard(&self, player: Player) -> Bitboard {
        self.color_bitboards[player.index()]
    }

    /// Finds the square of `player`'s king.
    pub fn king_square(&self, player: Player) -> Option<usize> {
        squares(self.player_bitboard(player))
            .find(|&sq| matches!(self.squares[sq], Some(p) if p.kind == PieceKind::King))
    }

    pub fn count_pieces(&self, player: Player, kind: PieceKind) -> usize {
        squares(self.player_bitboard(player))
            .filter(|&sq| matches!(self.squares[sq], Some(p) if p.kind == kind))
            .count()
    }

    /// Relocates the piece on `from_sq` to `to_sq` and returns whatever stood
    /// on `to_sq`. The piece keeps its promotion state; hands are untouched.
    pub fn move_piece(&mut self, from_sq: usize, to_sq: usize) -> Option<Piece> {
        let captured_piece = self.remove_piece(to_sq);
        if let Some(moving_piece) = self.remove_piece(from_sq) {
            self.set_piece(to_sq, moving_piece);
        }
        captured_piece
    }

    /// Reverts a `move_piece(from_sq, to_sq)` that returned `captured_piece`.
    pub fn unmove_piece(&mut self, from_sq: usize, to_sq: usize, captured_piece: Option<Piece>) {
        if let Some(moving_piece) = self.remove_piece(to_sq) {
            self.set_piece(from_sq, moving_piece);
        }
        if let Some(captured) = captured_piece {
            self.set_piece(to_sq, captured);
        }
    }

    /// Flags the piece on `sq` as promoted.
    pub fn promote_at(&mut self, sq: usize) {
        if let Some(piece) = self.squares[sq].as_mut() {
            debug_assert!(piece.kind.is_promotable());
            piece.promoted = true;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "    9  8  7  6  5  4  3  2  1")?;
        writeln!(f, "  +---------------------------+")?;
        for row in 0..BOARD_RANKS {
            write!(f, "{} |", row + 1)?;
            for col in 0..BOARD_FILES {
                match self.squares[sq_to_idx(row, col)] {
                    None => write!(f, " . ")?,
                    Some(piece) => {
                        let marker = if piece.owner == Player::Gote { 'v' } else { ' ' };
                        write!(f, "{}{} ", marker, piece.kind.display_char(piece.promoted))?;
                    }
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +---------------------------+")
    }
}

// --- Bitboard Helper Functions ---

#[inline]
pub fn popcount(bb: Bitboard) -> u32 {
    bb.count_ones()
}
