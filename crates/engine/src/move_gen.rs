//! Move generation logic, including pre-computed step and ray tables.
//!
//! Everything here is pseudo-legal: board edges and own-piece occupancy are
//! respected, but whether a move exposes the mover's king is left to
//! [`crate::rules`].

use crate::bitboard::{Bitboard, Board, SQUARE_MASKS, col_of, row_of, sq_to_idx, squares};
use crate::constants::{BOARD_FILES, BOARD_RANKS, NUM_SQUARES, Piece, Player};
use crate::movement::{ALL_DIRECTIONS, ALL_STEP_PATTERNS, Direction, NUM_STEP_PATTERNS, movement};
use once_cell::sync::Lazy;

const fn is_valid(r: isize, c: isize) -> bool {
    r >= 0 && r < BOARD_RANKS as isize && c >= 0 && c < BOARD_FILES as isize
}

/// A struct to hold all the pre-computed attack tables.
/// The tables are initialized once and then accessed globally.
pub struct AttackTables {
    /// `[pattern][player_idx][square]`: squares reachable by one step or jump.
    pub steps: [[[Bitboard; NUM_SQUARES]; 2]; NUM_STEP_PATTERNS],
    /// `[direction][square]`: every square along the ray, excluding the origin.
    pub rays: [[Bitboard; NUM_SQUARES]; 8],
}

impl AttackTables {
    fn new() -> Self {
        let mut tables = AttackTables {
            steps: [[[0; NUM_SQUARES]; 2]; NUM_STEP_PATTERNS],
            rays: [[0; NUM_SQUARES]; 8],
        };

        for pattern in ALL_STEP_PATTERNS {
            for player in [Player::Sente, Player::Gote] {
                // Gote's offsets are Sente's mirrored top-to-bottom.
                let sign = -player.forward();
                for sq in 0..NUM_SQUARES {
                    let (r, c) = (row_of(sq) as isize, col_of(sq) as isize);
                    for &(dr, dc) in pattern.offsets() {
                        let (nr, nc) = (r + dr * sign, c + dc);
                        if is_valid(nr, nc) {
                            tables.steps[pattern as usize][player.index()][sq] |=
                                SQUARE_MASKS[sq_to_idx(nr as usize, nc as usize)];
                        }
                    }
                }
            }
        }

        for dir in ALL_DIRECTIONS {
            let (dr, dc) = dir.delta();
            for sq in 0..NUM_SQUARES {
                let (mut r, mut c) = (row_of(sq) as isize + dr, col_of(sq) as isize + dc);
                while is_valid(r, c) {
                    tables.rays[dir as usize][sq] |= SQUARE_MASKS[sq_to_idx(r as usize, c as usize)];
                    r += dr;
                    c += dc;
                }
            }
        }

        tables
    }
}

// The global static instance of the attack tables, initialized lazily and only once.
pub static ATTACK_TABLES: Lazy<AttackTables> = Lazy::new(AttackTables::new);

/// Squares reached by sliding from `sq` towards `dir`, up to and including the
/// first occupied square.
pub fn slide_moves_bb(sq: usize, dir: Direction, occupied: Bitboard) -> Bitboard {
    let ray = ATTACK_TABLES.rays[dir as usize][sq];
    let blockers = occupied & ray;
    if blockers == 0 {
        return ray;
    }
    let first_blocker = if dir.is_increasing() {
        blockers.trailing_zeros() as usize
    } else {
        127 - blockers.leading_zeros() as usize
    };
    ray ^ ATTACK_TABLES.rays[dir as usize][first_blocker]
}

/// Every square `piece` standing on `sq` attacks, own pieces included.
pub fn piece_attacks_bb(piece: Piece, sq: usize, occupied: Bitboard) -> Bitboard {
    let mv = movement(piece.kind, piece.promoted);
    let mut attacks = match mv.steps {
        Some(pattern) => ATTACK_TABLES.steps[pattern as usize][piece.owner.index()][sq],
        None => 0,
    };
    for dir in mv.slides {
        attacks |= slide_moves_bb(sq, dir.oriented(piece.owner), occupied);
    }
    attacks
}

/// Pseudo-legal destinations of the piece on `sq`; empty if the square is.
pub fn pseudo_legal_moves(board: &Board, sq: usize) -> Bitboard {
    match board.piece_at(sq) {
        Some(piece) => {
            piece_attacks_bb(piece, sq, board.occupied_bitboard())
                & !board.player_bitboard(piece.owner)
        }
        None => 0,
    }
}

/// Whether `player`'s king is attacked.
///
/// This runs the generator for every opposing piece, so each call costs up to
/// 20 piece move generations. Legality filtering calls it once per candidate.
///
/// # Panics
///
/// Panics if `player` has no king on the board, which only happens if a
/// position was built around the validating constructors.
pub fn is_king_in_check(board: &Board, player: Player) -> bool {
    let Some(king_sq) = board.king_square(player) else {
        panic!("{player:?} king missing from the board");
    };
    let king_mask = SQUARE_MASKS[king_sq];
    squares(board.player_bitboard(player.opponent()))
        .any(|from_sq| pseudo_legal_moves(board, from_sq) & king_mask != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::popcount;
    use crate::constants::PieceKind;

    fn lone(piece: Piece, row: usize, col: usize) -> (Board, usize) {
        let mut board = Board::new();
        let sq = sq_to_idx(row, col);
        board.set_piece(sq, piece);
        (board, sq)
    }

    fn bb(cells: &[(usize, usize)]) -> Bitboard {
        cells.iter().fold(0, |acc, &(r, c)| acc | SQUARE_MASKS[sq_to_idx(r, c)])
    }

    #[test]
    fn king_steps_in_all_directions() {
        let (board, sq) = lone(Piece::new(PieceKind::King, Player::Sente), 4, 4);
        assert_eq!(popcount(pseudo_legal_moves(&board, sq)), 8);
        let (board, sq) = lone(Piece::new(PieceKind::King, Player::Gote), 0, 0);
        assert_eq!(pseudo_legal_moves(&board, sq), bb(&[(0, 1), (1, 0), (1, 1)]));
    }

    #[test]
    fn gold_and_silver_are_oriented_by_owner() {
        let (board, sq) = lone(Piece::new(PieceKind::Gold, Player::Sente), 4, 4);
        assert_eq!(
            pseudo_legal_moves(&board, sq),
            bb(&[(3, 3), (3, 4), (3, 5), (4, 3), (4, 5), (5, 4)])
        );
        let (board, sq) = lone(Piece::new(PieceKind::Gold, Player::Gote), 4, 4);
        assert_eq!(
            pseudo_legal_moves(&board, sq),
            bb(&[(5, 3), (5, 4), (5, 5), (4, 3), (4, 5), (3, 4)])
        );
        let (board, sq) = lone(Piece::new(PieceKind::Silver, Player::Sente), 4, 4);
        assert_eq!(
            pseudo_legal_moves(&board, sq),
            bb(&[(3, 3), (3, 4), (3, 5), (5, 3), (5, 5)])
        );
        let (board, sq) = lone(Piece::new(PieceKind::Silver, Player::Gote), 4, 4);
        assert_eq!(
            pseudo_legal_moves(&board, sq),
            bb(&[(5, 3), (5, 4), (5, 5), (3, 3), (3, 5)])
        );
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let mut board = Board::new();
        let sq = sq_to_idx(6, 4);
        board.set_piece(sq, Piece::new(PieceKind::Knight, Player::Sente));
        board.set_piece(sq_to_idx(5, 4), Piece::new(PieceKind::Pawn, Player::Sente));
        board.set_piece(sq_to_idx(5, 3), Piece::new(PieceKind::Pawn, Player::Gote));
        board.set_piece(sq_to_idx(4, 5), Piece::new(PieceKind::Pawn, Player::Gote));
        assert_eq!(pseudo_legal_moves(&board, sq), bb(&[(4, 3), (4, 5)]));

        let (board, sq) = lone(Piece::new(PieceKind::Knight, Player::Gote), 7, 0);
        assert_eq!(pseudo_legal_moves(&board, sq), 0);
        let (board, sq) = lone(Piece::new(PieceKind::Knight, Player::Gote), 2, 0);
        assert_eq!(pseudo_legal_moves(&board, sq), bb(&[(4, 1)]));
    }

    #[test]
    fn lance_slides_forward_until_blocked() {
        let mut board = Board::new();
        let sq = sq_to_idx(8, 0);
        board.set_piece(sq, Piece::new(PieceKind::Lance, Player::Sente));
        board.set_piece(sq_to_idx(4, 0), Piece::new(PieceKind::Pawn, Player::Gote));
        assert_eq!(
            pseudo_legal_moves(&board, sq),
            bb(&[(7, 0), (6, 0), (5, 0), (4, 0)])
        );

        let mut board = Board::new();
        let sq = sq_to_idx(0, 8);
        board.set_piece(sq, Piece::new(PieceKind::Lance, Player::Gote));
        board.set_piece(sq_to_idx(3, 8), Piece::new(PieceKind::Pawn, Player::Gote));
        assert_eq!(pseudo_legal_moves(&board, sq), bb(&[(1, 8), (2, 8)]));
    }

    #[test]
    fn pawn_steps_forward_only() {
        let (board, sq) = lone(Piece::new(PieceKind::Pawn, Player::Sente), 6, 2);
        assert_eq!(pseudo_legal_moves(&board, sq), bb(&[(5, 2)]));
        let (board, sq) = lone(Piece::new(PieceKind::Pawn, Player::Gote), 2, 2);
        assert_eq!(pseudo_legal_moves(&board, sq), bb(&[(3, 2)]));
        let (board, sq) = lone(Piece::new(PieceKind::Pawn, Player::Sente), 0, 2);
        assert_eq!(pseudo_legal_moves(&board, sq), 0);
    }

    #[test]
    fn rook_and_dragon() {
        let mut board = Board::new();
        let sq = sq_to_idx(4, 4);
        board.set_piece(sq, Piece::new(PieceKind::Rook, Player::Sente));
        board.set_piece(sq_to_idx(4, 6), Piece::new(PieceKind::Pawn, Player::Sente));
        board.set_piece(sq_to_idx(2, 4), Piece::new(PieceKind::Pawn, Player::Gote));
        let rook = pseudo_legal_moves(&board, sq);
        assert_eq!(
            rook,
            bb(&[
                (3, 4), (2, 4),
                (5, 4), (6, 4), (7, 4), (8, 4),
                (4, 3), (4, 2), (4, 1), (4, 0),
                (4, 5),
            ])
        );

        board.promote_at(sq);
        let dragon = pseudo_legal_moves(&board, sq);
        assert_eq!(dragon, rook | bb(&[(3, 3), (3, 5), (5, 3), (5, 5)]));
    }

    #[test]
    fn bishop_and_horse() {
        let mut board = Board::new();
        let sq = sq_to_idx(7, 1);
        board.set_piece(sq, Piece::new(PieceKind::Bishop, Player::Sente));
        board.set_piece(sq_to_idx(5, 3), Piece::new(PieceKind::Pawn, Player::Gote));
        let bishop = pseudo_legal_moves(&board, sq);
        assert_eq!(bishop, bb(&[(6, 2), (5, 3), (6, 0), (8, 0), (8, 2)]));

        board.promote_at(sq);
        let horse = pseudo_legal_moves(&board, sq);
        assert_eq!(horse, bishop | bb(&[(6, 1), (8, 1), (7, 0), (7, 2)]));
    }

    #[test]
    fn slides_stop_at_first_blocker_in_both_index_orders() {
        let occupied = SQUARE_MASKS[sq_to_idx(1, 1)] | SQUARE_MASKS[sq_to_idx(7, 7)];
        let from = sq_to_idx(4, 4);
        assert_eq!(
            slide_moves_bb(from, Direction::NorthWest, occupied),
            bb(&[(3, 3), (2, 2), (1, 1)])
        );
        assert_eq!(
            slide_moves_bb(from, Direction::SouthEast, occupied),
            bb(&[(5, 5), (6, 6), (7, 7)])
        );
        assert_eq!(
            slide_moves_bb(from, Direction::NorthEast, occupied),
            bb(&[(3, 5), (2, 6), (1, 7), (0, 8)])
        );
    }

    #[test]
    fn initial_position_is_not_check() {
        let board = Board::initial();
        assert!(!is_king_in_check(&board, Player::Sente));
        assert!(!is_king_in_check(&board, Player::Gote));
    }

    #[test]
    #[should_panic(expected = "king missing")]
    fn missing_king_is_fatal() {
        is_king_in_check(&Board::new(), Player::Sente);
    }
}
