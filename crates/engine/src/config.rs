//! Configuration for the shogi rules engine.

use crate::constants::PROMOTION_ZONE_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Promote pawns, lances and knights that would otherwise be stuck with
    /// no further move, whatever the caller asked for. Off by default, which
    /// keeps promotion optional everywhere.
    pub forced_promotion: bool,

    /// Number of far ranks that make up the promotion zone.
    pub promotion_zone_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forced_promotion: false,
            promotion_zone_depth: PROMOTION_ZONE_DEPTH,
        }
    }
}
