//! Pieces held in hand after being captured.

use crate::constants::{ALL_KINDS, Piece, PieceKind, Player};

/// Captured pieces of one player, in capture order.
///
/// Pieces are stored unpromoted and owned by the holder. Nothing returns
/// them to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    pieces: Vec<Piece>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Banks a piece captured by `holder`.
    pub fn add(&mut self, captured: Piece, holder: Player) {
        self.pieces.push(captured.captured_by(holder));
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn count(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|p| p.kind == kind).count()
    }

    /// The hand part of a position string for one player, e.g. `2P` or `rb`.
    /// Kinds follow the conventional R B G S N L P order.
    pub fn to_sfen(&self, holder: Player) -> String {
        let mut out = String::new();
        for kind in ALL_KINDS.into_iter().filter(|&k| k != PieceKind::King) {
            let n = self.count(kind);
            if n == 0 {
                continue;
            }
            if n > 1 {
                out.push_str(&n.to_string());
            }
            out.push(match holder {
                Player::Sente => kind.to_sfen_char().to_ascii_uppercase(),
                Player::Gote => kind.to_sfen_char(),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banked_pieces_are_demoted_and_reowned() {
        let mut hand = Hand::new();
        hand.add(Piece::promoted(PieceKind::Bishop, Player::Gote), Player::Sente);
        hand.add(Piece::new(PieceKind::Pawn, Player::Gote), Player::Sente);
        hand.add(Piece::promoted(PieceKind::Pawn, Player::Gote), Player::Sente);

        assert_eq!(hand.len(), 3);
        assert!(hand.pieces().iter().all(|p| !p.promoted && p.owner == Player::Sente));
        assert_eq!(hand.count(PieceKind::Pawn), 2);
        assert_eq!(hand.pieces()[0].kind, PieceKind::Bishop);
        assert_eq!(hand.to_sfen(Player::Sente), "B2P");
        assert_eq!(hand.to_sfen(Player::Gote), "b2p");
    }
}
