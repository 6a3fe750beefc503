//! Arpeggiation spacing: tight monotonic spirals

use super::{realize, respaced, Direction};
use crate::models::{Collection, CollectionList, Pattern};
use serde::{Deserialize, Serialize};

/// Spaces each selected collection as a tightly packed arpeggio
///
/// Segments keep their order; sets are read in ascending pitch-class order.
/// Upward spirals start in octave 4; downward spirals are raised by octaves
/// until they end in octave 4 or above.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArpeggiationSpacingSpecifier {
    pub direction: Direction,
    pub pattern: Pattern,
}

impl ArpeggiationSpacingSpecifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Space one collection regardless of the pattern
    pub fn space(&self, collection: &Collection) -> Collection {
        let pitches = realize(&collection.pitch_class_sequence(), self.direction);
        respaced(collection, pitches)
    }

    pub fn apply(&self, collections: &CollectionList) -> CollectionList {
        collections.map_selected(&self.pattern, |collection| self.space(collection))
    }

    /// Absent input is a no-op rather than an error
    pub fn call(&self, collections: Option<&CollectionList>) -> Option<CollectionList> {
        collections.map(|collections| self.apply(collections))
    }
}
