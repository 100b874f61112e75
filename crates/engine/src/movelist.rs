//! A move list implementation that avoids heap allocations.

use crate::r#move::Move;
use std::ops::Index;

// Board moves only: no drops, so the widest positions stay well below this.
const MAX_MOVES: usize = 512;

#[derive(Debug, Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            moves: [Move::new(0, 0, false); MAX_MOVES],
            count: 0,
        }
    }

    pub fn add(&mut self, mv: Move) {
        if self.count < MAX_MOVES {
            self.moves[self.count] = mv;
            self.count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves[0..self.count]
    }

    pub fn contains(&self, from_sq: usize, to_sq: usize) -> bool {
        self.as_slice()
            .iter()
            .any(|mv| mv.from_sq() == from_sq && mv.to_sq() == to_sq)
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
