//! Movement rules as data: every piece kind and promotion state maps to a
//! union of one step pattern and a set of sliding directions.
//!
//! Directions are written from Sente's point of view (forward = up the board,
//! towards row 0) and flipped for Gote by negating the row delta.

use crate::constants::{PieceKind, Player};

/// The eight compass directions on the board. `North` is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

pub const ORTHOGONALS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

pub const DIAGONALS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

impl Direction {
    /// (row delta, column delta).
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Mirror top-to-bottom.
    pub const fn flipped(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthEast,
            Direction::East => Direction::East,
            Direction::SouthEast => Direction::NorthEast,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthWest,
            Direction::West => Direction::West,
            Direction::NorthWest => Direction::SouthWest,
        }
    }

    /// The absolute direction for a Sente-relative one.
    pub fn oriented(self, player: Player) -> Direction {
        match player {
            Player::Sente => self,
            Player::Gote => self.flipped(),
        }
    }

    /// Whether square indices grow along this direction.
    pub const fn is_increasing(self) -> bool {
        matches!(
            self,
            Direction::East | Direction::SouthEast | Direction::South | Direction::SouthWest
        )
    }
}

/// Single-step (or jump) move sets, each a fixed list of offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum StepPattern {
    King = 0,
    Gold = 1,
    Silver = 2,
    Knight = 3,
    Pawn = 4,
    /// The four straight-adjacent squares; the extra steps of a horse.
    Orthogonal = 5,
    /// The four diagonal-adjacent squares; the extra steps of a dragon.
    Diagonal = 6,
}

pub const NUM_STEP_PATTERNS: usize = 7;

pub const ALL_STEP_PATTERNS: [StepPattern; NUM_STEP_PATTERNS] = [
    StepPattern::King,
    StepPattern::Gold,
    StepPattern::Silver,
    StepPattern::Knight,
    StepPattern::Pawn,
    StepPattern::Orthogonal,
    StepPattern::Diagonal,
];

impl StepPattern {
    /// Offsets as (row delta, column delta) for Sente.
    pub const fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            StepPattern::King => &[
                (-1, -1), (-1, 0), (-1, 1),
                (0, -1), (0, 1),
                (1, -1), (1, 0), (1, 1),
            ],
            StepPattern::Gold => &[(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)],
            StepPattern::Silver => &[(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)],
            StepPattern::Knight => &[(-2, -1), (-2, 1)],
            StepPattern::Pawn => &[(-1, 0)],
            StepPattern::Orthogonal => &[(-1, 0), (0, 1), (1, 0), (0, -1)],
            StepPattern::Diagonal => &[(-1, 1), (1, 1), (1, -1), (-1, -1)],
        }
    }
}

/// The full move set of one piece kind in one promotion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub steps: Option<StepPattern>,
    pub slides: &'static [Direction],
}

const GOLD_EQUIVALENT: Movement = Movement { steps: Some(StepPattern::Gold), slides: &[] };

/// Looks up the movement of a kind, promoted or not.
pub fn movement(kind: PieceKind, promoted: bool) -> Movement {
    match (kind, promoted) {
        (PieceKind::King, _) => Movement { steps: Some(StepPattern::King), slides: &[] },
        (PieceKind::Gold, _) => GOLD_EQUIVALENT,
        (PieceKind::Silver | PieceKind::Knight | PieceKind::Lance | PieceKind::Pawn, true) => {
            GOLD_EQUIVALENT
        }
        (PieceKind::Silver, false) => Movement { steps: Some(StepPattern::Silver), slides: &[] },
        (PieceKind::Knight, false) => Movement { steps: Some(StepPattern::Knight), slides: &[] },
        (PieceKind::Pawn, false) => Movement { steps: Some(StepPattern::Pawn), slides: &[] },
        (PieceKind::Lance, false) => Movement { steps: None, slides: &[Direction::North] },
        (PieceKind::Bishop, false) => Movement { steps: None, slides: &DIAGONALS },
        (PieceKind::Bishop, true) => Movement {
            steps: Some(StepPattern::Orthogonal),
            slides: &DIAGONALS,
        },
        (PieceKind::Rook, false) => Movement { steps: None, slides: &ORTHOGONALS },
        (PieceKind::Rook, true) => Movement {
            steps: Some(StepPattern::Diagonal),
            slides: &ORTHOGONALS,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ALL_KINDS;

    #[test]
    fn flipping_twice_is_identity() {
        for dir in ALL_DIRECTIONS {
            assert_eq!(dir.flipped().flipped(), dir);
            let (dr, dc) = dir.delta();
            assert_eq!(dir.flipped().delta(), (-dr, dc));
        }
    }

    #[test]
    fn increasing_directions_match_index_deltas() {
        for dir in ALL_DIRECTIONS {
            let (dr, dc) = dir.delta();
            assert_eq!(dir.is_increasing(), dr * 9 + dc > 0, "{dir:?}");
        }
    }

    #[test]
    fn promoted_minor_pieces_move_like_gold() {
        for kind in [PieceKind::Silver, PieceKind::Knight, PieceKind::Lance, PieceKind::Pawn] {
            assert_eq!(movement(kind, true), movement(PieceKind::Gold, false));
        }
    }

    #[test]
    fn every_movement_is_non_empty() {
        for kind in ALL_KINDS {
            for promoted in [false, true] {
                let m = movement(kind, promoted);
                assert!(m.steps.is_some() || !m.slides.is_empty());
            }
        }
    }
}
