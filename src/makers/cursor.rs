//! Cursor: a reading position over a collection list

use crate::errors::{PitchError, Result};
use crate::models::{Collection, CollectionList};

/// Reads collections from a source list in order, optionally wrapping
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    source: CollectionList,
    position: usize,
    cyclic: bool,
}

impl Cursor {
    pub fn new(source: CollectionList, cyclic: bool) -> Self {
        Self {
            source,
            position: 0,
            cyclic,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Read the next `count` collections and move past them
    ///
    /// A cyclic cursor wraps to the start of its source; a non-cyclic one
    /// fails without moving when fewer than `count` collections remain.
    pub fn advance(&mut self, count: usize) -> Result<Vec<Collection>> {
        let length = self.source.len();
        let exhausted = PitchError::CursorExhausted {
            position: self.position,
            length,
        };
        if count == 0 {
            return Ok(Vec::new());
        }
        if length == 0 || (!self.cyclic && self.position + count > length) {
            return Err(exhausted);
        }
        let collections = (self.position..self.position + count)
            .map(|index| self.source[index % length].clone())
            .collect();
        self.position = if self.cyclic {
            (self.position + count) % length
        } else {
            self.position + count
        };
        Ok(collections)
    }
}
