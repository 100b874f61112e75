//! Constants and basic piece types used in the shogi engine.

pub const BOARD_FILES: usize = 9;
pub const BOARD_RANKS: usize = 9;
pub const NUM_SQUARES: usize = BOARD_FILES * BOARD_RANKS;

/// Number of far ranks that form a player's promotion zone.
pub const PROMOTION_ZONE_DEPTH: usize = 3;

/// The eight base piece kinds. A promoted piece keeps its base kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Rook,
    Bishop,
    Gold,
    Silver,
    Knight,
    Lance,
    Pawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Sente,
    Gote,
}

/// A piece on the board or in a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
    pub promoted: bool,
}

pub const ALL_KINDS: [PieceKind; 8] = [
    PieceKind::King,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Gold,
    PieceKind::Silver,
    PieceKind::Knight,
    PieceKind::Lance,
    PieceKind::Pawn,
];

impl PieceKind {
    /// How many pieces of this kind a full set holds, both sides together.
    pub fn set_count(self) -> usize {
        match self {
            PieceKind::King | PieceKind::Rook | PieceKind::Bishop => 2,
            PieceKind::Gold | PieceKind::Silver | PieceKind::Knight | PieceKind::Lance => 4,
            PieceKind::Pawn => 18,
        }
    }

    /// Whether this kind has a promoted form. King and Gold do not.
    pub fn is_promotable(self) -> bool {
        !matches!(self, PieceKind::King | PieceKind::Gold)
    }

    /// Lowercase SFEN letter for the kind.
    pub fn to_sfen_char(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Gold => 'g',
            PieceKind::Silver => 's',
            PieceKind::Knight => 'n',
            PieceKind::Lance => 'l',
            PieceKind::Pawn => 'p',
        }
    }

    pub fn from_sfen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'g' => Some(PieceKind::Gold),
            's' => Some(PieceKind::Silver),
            'n' => Some(PieceKind::Knight),
            'l' => Some(PieceKind::Lance),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// Display letter, using the conventional promoted names
    /// (dragon, horse, tokin, ...) when `promoted` is set.
    pub fn display_char(self, promoted: bool) -> char {
        if !promoted {
            return self.to_sfen_char().to_ascii_uppercase();
        }
        match self {
            PieceKind::Rook => 'D',
            PieceKind::Bishop => 'H',
            PieceKind::Silver => 'A',
            PieceKind::Knight => 'M',
            PieceKind::Lance => 'Y',
            PieceKind::Pawn => 'T',
            PieceKind::King | PieceKind::Gold => self.display_char(false),
        }
    }
}

impl Player {
    /// Get the opponent of the player.
    pub fn opponent(self) -> Player {
        match self {
            Player::Sente => Player::Gote,
            Player::Gote => Player::Sente,
        }
    }

    /// Index for per-player arrays (0 for Sente, 1 for Gote).
    pub fn index(self) -> usize {
        match self {
            Player::Sente => 0,
            Player::Gote => 1,
        }
    }

    /// Row delta of one step "forward" for this player.
    pub fn forward(self) -> isize {
        match self {
            Player::Sente => -1,
            Player::Gote => 1,
        }
    }

    /// Whether `row` lies in this player's promotion zone of the given depth.
    pub fn in_promotion_zone(self, row: usize, depth: usize) -> bool {
        match self {
            Player::Sente => row < depth,
            Player::Gote => row + depth >= BOARD_RANKS,
        }
    }
}

impl Piece {
    pub fn new(kind: PieceKind, owner: Player) -> Self {
        Self { kind, owner, promoted: false }
    }

    pub fn promoted(kind: PieceKind, owner: Player) -> Self {
        debug_assert!(kind.is_promotable());
        Self { kind, owner, promoted: true }
    }

    /// The piece as it enters the capturer's hand: unpromoted and re-owned.
    pub fn captured_by(self, capturer: Player) -> Self {
        Self { kind: self.kind, owner: capturer, promoted: false }
    }

    pub fn to_sfen_string(self) -> String {
        let letter = match self.owner {
            Player::Sente => self.kind.to_sfen_char().to_ascii_uppercase(),
            Player::Gote => self.kind.to_sfen_char(),
        };
        if self.promoted {
            format!("+{}", letter)
        } else {
            letter.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotable_kinds_exclude_king_and_gold() {
        let promotable: Vec<_> = ALL_KINDS.iter().filter(|k| k.is_promotable()).collect();
        assert_eq!(promotable.len(), 6);
        assert!(!PieceKind::King.is_promotable());
        assert!(!PieceKind::Gold.is_promotable());
    }

    #[test]
    fn full_set_has_forty_pieces() {
        let total: usize = ALL_KINDS.iter().map(|k| k.set_count()).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn promotion_zone_mirrors_between_players() {
        for row in 0..BOARD_RANKS {
            assert_eq!(
                Player::Sente.in_promotion_zone(row, PROMOTION_ZONE_DEPTH),
                row <= 2
            );
            assert_eq!(
                Player::Gote.in_promotion_zone(row, PROMOTION_ZONE_DEPTH),
                row >= 6
            );
        }
    }

    #[test]
    fn capture_strips_promotion_and_changes_owner() {
        let dragon = Piece::promoted(PieceKind::Rook, Player::Gote);
        let banked = dragon.captured_by(Player::Sente);
        assert_eq!(banked, Piece::new(PieceKind::Rook, Player::Sente));
    }
}
