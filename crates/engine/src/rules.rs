//! Legality filtering, checkmate detection and the promotion rule.

use crate::bitboard::{Bitboard, Board, SQUARE_MASKS, row_of, squares};
use crate::config::Config;
use crate::constants::{BOARD_RANKS, PROMOTION_ZONE_DEPTH, Piece, PieceKind, Player};
use crate::move_gen::{is_king_in_check, pseudo_legal_moves};
use tracing::trace;

/// Destinations of the piece on `from_sq` that do not leave its owner's king
/// in check.
///
/// Each candidate is tried on a scratch copy of the board with an apply/undo
/// pair.
pub fn legal_moves(board: &Board, from_sq: usize) -> Bitboard {
    let Some(piece) = board.piece_at(from_sq) else {
        return 0;
    };
    let mut scratch = board.clone();
    let mut legal = 0;
    for to_sq in squares(pseudo_legal_moves(board, from_sq)) {
        if is_safe_move(&mut scratch, piece.owner, from_sq, to_sq) {
            legal |= SQUARE_MASKS[to_sq];
        }
    }
    legal
}

/// Simulates `from_sq -> to_sq` on `scratch` and reports whether `mover`'s
/// king is safe afterwards. `scratch` is restored before returning.
fn is_safe_move(scratch: &mut Board, mover: Player, from_sq: usize, to_sq: usize) -> bool {
    let captured = scratch.move_piece(from_sq, to_sq);
    let safe = !is_king_in_check(scratch, mover);
    scratch.unmove_piece(from_sq, to_sq, captured);
    trace!(from_sq, to_sq, safe, "legality probe");
    safe
}

/// Whether `player` has at least one legal move anywhere on the board.
/// Stops at the first one found.
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    let mut scratch = board.clone();
    squares(board.player_bitboard(player)).any(|from_sq| {
        squares(pseudo_legal_moves(board, from_sq))
            .any(|to_sq| is_safe_move(&mut scratch, player, from_sq, to_sq))
    })
}

/// True if `player` is not in check, or has some move that gets out of it.
pub fn can_escape_check(board: &Board, player: Player) -> bool {
    !is_king_in_check(board, player) || has_legal_move(board, player)
}

/// `player` is in check and no legal move gets out of it.
pub fn is_checkmate(board: &Board, player: Player) -> bool {
    !can_escape_check(board, player)
}

/// Whether `piece` may promote on arriving at `to_row`, using the standard
/// three-rank zone.
pub fn can_promote(piece: Piece, to_row: usize) -> bool {
    can_promote_in_zone(piece, to_row, PROMOTION_ZONE_DEPTH)
}

pub fn can_promote_in_zone(piece: Piece, to_row: usize, zone_depth: usize) -> bool {
    !piece.promoted
        && piece.kind.is_promotable()
        && piece.owner.in_promotion_zone(to_row, zone_depth)
}

/// Whether an unpromoted `piece` landing on `to_row` would have no further
/// move: pawns and lances on the last rank, knights on the last two.
pub fn is_dead_end(piece: Piece, to_row: usize) -> bool {
    if piece.promoted {
        return false;
    }
    let ranks_left = match piece.owner {
        Player::Sente => to_row,
        Player::Gote => BOARD_RANKS - 1 - to_row,
    };
    match piece.kind {
        PieceKind::Pawn | PieceKind::Lance => ranks_left == 0,
        PieceKind::Knight => ranks_left <= 1,
        _ => false,
    }
}

/// Decides whether the piece moving to `to_sq` ends up promoted, given the
/// caller's choice and the rules configuration.
pub fn resolve_promotion(config: &Config, piece: Piece, to_sq: usize, requested: bool) -> bool {
    let to_row = row_of(to_sq);
    if !can_promote_in_zone(piece, to_row, config.promotion_zone_depth) {
        return false;
    }
    requested || (config.forced_promotion && is_dead_end(piece, to_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{popcount, sq_to_idx};

    #[test]
    fn pinned_piece_cannot_leave_the_file() {
        // Gote rook pins a Sente gold against its king on file 5.
        let mut board = Board::new();
        board.set_piece(sq_to_idx(8, 4), Piece::new(PieceKind::King, Player::Sente));
        board.set_piece(sq_to_idx(6, 4), Piece::new(PieceKind::Gold, Player::Sente));
        board.set_piece(sq_to_idx(1, 4), Piece::new(PieceKind::Rook, Player::Gote));
        board.set_piece(sq_to_idx(0, 0), Piece::new(PieceKind::King, Player::Gote));

        let gold = sq_to_idx(6, 4);
        assert_eq!(popcount(pseudo_legal_moves(&board, gold)), 6);
        assert_eq!(
            legal_moves(&board, gold),
            SQUARE_MASKS[sq_to_idx(5, 4)] | SQUARE_MASKS[sq_to_idx(7, 4)]
        );
    }

    /// Gote king on 51 with a Sente rook giving check down file 5 and lances
    /// covering files 6 and 4. `left_guard` stands on 61.
    fn boxed_gote_king(left_guard: PieceKind) -> Board {
        let mut board = Board::new();
        board.set_piece(sq_to_idx(0, 4), Piece::new(PieceKind::King, Player::Gote));
        board.set_piece(sq_to_idx(0, 3), Piece::new(left_guard, Player::Gote));
        board.set_piece(sq_to_idx(0, 5), Piece::new(PieceKind::Pawn, Player::Gote));
        board.set_piece(sq_to_idx(6, 4), Piece::new(PieceKind::Rook, Player::Sente));
        board.set_piece(sq_to_idx(8, 3), Piece::new(PieceKind::Lance, Player::Sente));
        board.set_piece(sq_to_idx(8, 5), Piece::new(PieceKind::Lance, Player::Sente));
        board.set_piece(sq_to_idx(8, 0), Piece::new(PieceKind::King, Player::Sente));
        board
    }

    #[test]
    fn escape_check_when_not_in_check() {
        let board = Board::initial();
        assert!(can_escape_check(&board, Player::Sente));
        assert!(can_escape_check(&board, Player::Gote));
        assert!(!is_checkmate(&board, Player::Gote));
    }

    #[test]
    fn escape_check_by_interposing() {
        let board = boxed_gote_king(PieceKind::Gold);
        assert!(is_king_in_check(&board, Player::Gote));
        assert!(can_escape_check(&board, Player::Gote));
        assert!(!is_checkmate(&board, Player::Gote));
        assert_eq!(
            legal_moves(&board, sq_to_idx(0, 3)),
            SQUARE_MASKS[sq_to_idx(1, 4)]
        );
    }

    #[test]
    fn no_escape_from_mate() {
        let board = boxed_gote_king(PieceKind::Pawn);
        assert!(!can_escape_check(&board, Player::Gote));
        assert!(is_checkmate(&board, Player::Gote));
        assert!(can_escape_check(&board, Player::Sente));
    }

    #[test]
    fn legality_queries_leave_board_untouched() {
        let board = Board::initial();
        let before = board.clone();
        for sq in 0..81 {
            legal_moves(&board, sq);
        }
        assert!(has_legal_move(&board, Player::Sente));
        assert_eq!(board, before);
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert_eq!(legal_moves(&Board::initial(), sq_to_idx(4, 4)), 0);
    }

    #[test]
    fn promotion_rule() {
        let silver = Piece::new(PieceKind::Silver, Player::Sente);
        assert!(can_promote(silver, 2));
        assert!(!can_promote(silver, 3));
        assert!(!can_promote(Piece::new(PieceKind::Gold, Player::Sente), 0));
        assert!(!can_promote(Piece::new(PieceKind::King, Player::Sente), 0));
        assert!(!can_promote(Piece::promoted(PieceKind::Pawn, Player::Sente), 0));
        let pawn = Piece::new(PieceKind::Pawn, Player::Gote);
        assert!(can_promote(pawn, 6));
        assert!(!can_promote(pawn, 5));
    }

    #[test]
    fn forced_promotion_only_applies_when_configured() {
        let lance = Piece::new(PieceKind::Lance, Player::Sente);
        let last_rank = sq_to_idx(0, 0);
        let optional = Config::default();
        assert!(!resolve_promotion(&optional, lance, last_rank, false));
        assert!(resolve_promotion(&optional, lance, last_rank, true));

        let forced = Config { forced_promotion: true, ..Config::default() };
        assert!(resolve_promotion(&forced, lance, last_rank, false));
        assert!(!resolve_promotion(&forced, lance, sq_to_idx(1, 0), false));
        let knight = Piece::new(PieceKind::Knight, Player::Gote);
        assert!(resolve_promotion(&forced, knight, sq_to_idx(7, 3), false));
        assert!(!resolve_promotion(&forced, knight, sq_to_idx(6, 3), false));
    }
}
