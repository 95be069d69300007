use std::num::NonZero;

use crate::core::{GameError, Move};

/// Applied moves in the order they happened. Grows up to `capacity` and is only
/// ever shortened from the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
    capacity: NonZero<usize>,
}

impl History {
    #[must_use]
    pub fn new(capacity: NonZero<usize>) -> Self {
        Self {
            moves: Vec::new(),
            capacity,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.moves.len() >= self.capacity.get()
    }

    pub fn record(&mut self, mv: Move) -> Result<(), GameError> {
        if self.is_full() {
            return Err(GameError::CapacityExceeded {
                capacity: self.capacity.get(),
            });
        }
        self.moves.push(mv);
        Ok(())
    }

    pub fn undo(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}
