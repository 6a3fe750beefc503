//! Spacing: assigning registers to pitch-class collections
//!
//! Two specifiers turn octave-free material into registered pitches:
//!
//! - `ArpeggiationSpacingSpecifier` lays the pitch-classes out as a tight
//!   monotonic spiral, in the order given.
//! - `ChordalSpacingSpecifier` first reorders the pitch-classes into a
//!   voicing with a fixed bass and/or soprano and a minimum gap between
//!   voices, then lays that voicing out the same way.
//!
//! Both act on every collection of a `CollectionList` selected by their
//! pattern and pass the rest through unchanged.

pub mod arpeggiation;
pub mod chordal;

pub use arpeggiation::ArpeggiationSpacingSpecifier;
pub use chordal::ChordalSpacingSpecifier;

use crate::errors::Result;
use crate::models::{Collection, CollectionList, Items, Order, Pitch, PitchClass};
use serde::{Deserialize, Serialize};

/// Quarter-tones per octave
const OCTAVE: i32 = 24;

/// Lowest octave a descending realization may end in
const LOWEST_FINAL_OCTAVE: i32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

/// Either spacing specifier, for callers that choose one at runtime
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Spacing {
    Arpeggiation(ArpeggiationSpacingSpecifier),
    Chordal(ChordalSpacingSpecifier),
}

impl Spacing {
    pub fn apply(&self, collections: &CollectionList) -> Result<CollectionList> {
        match self {
            Spacing::Arpeggiation(specifier) => Ok(specifier.apply(collections)),
            Spacing::Chordal(specifier) => specifier.apply(collections),
        }
    }
}

/// Each pitch-class placed at the lowest pitch not below its predecessor;
/// the first sits in octave 4
pub fn tightly_spaced_ascending(pitch_classes: &[PitchClass]) -> Vec<Pitch> {
    let mut pitches: Vec<Pitch> = Vec::with_capacity(pitch_classes.len());
    for pitch_class in pitch_classes {
        let pitch = match pitches.last() {
            None => pitch_class.to_pitch(),
            Some(previous) => {
                let previous = previous.quarter_tones();
                let up = (pitch_class.quarter_tones() - previous).rem_euclid(OCTAVE);
                Pitch::from_quarter_tones(previous + up)
            }
        };
        pitches.push(pitch);
    }
    pitches
}

/// Each pitch-class placed at the highest pitch not above its predecessor;
/// the whole result then rises by octaves until it ends in octave 4 or above
pub fn tightly_spaced_descending(pitch_classes: &[PitchClass]) -> Vec<Pitch> {
    let mut pitches: Vec<Pitch> = Vec::with_capacity(pitch_classes.len());
    for pitch_class in pitch_classes {
        let pitch = match pitches.last() {
            None => pitch_class.to_pitch(),
            Some(previous) => {
                let previous = previous.quarter_tones();
                let down = (previous - pitch_class.quarter_tones()).rem_euclid(OCTAVE);
                Pitch::from_quarter_tones(previous - down)
            }
        };
        pitches.push(pitch);
    }
    if let Some(last) = pitches.last() {
        let octaves = (LOWEST_FINAL_OCTAVE - last.octave()).max(0);
        if octaves > 0 {
            pitches = pitches
                .iter()
                .map(|pitch| pitch.transpose_octaves(octaves))
                .collect();
        }
    }
    pitches
}

fn realize(pitch_classes: &[PitchClass], direction: Direction) -> Vec<Pitch> {
    match direction {
        Direction::Up => tightly_spaced_ascending(pitch_classes),
        Direction::Down => tightly_spaced_descending(pitch_classes),
    }
}

/// Rebuild spaced pitches under the source collection's order
fn respaced(source: &Collection, pitches: Vec<Pitch>) -> Collection {
    let order = if source.is_empty() {
        Order::Segment
    } else {
        source.order()
    };
    Collection::new(order, Items::Pitches(pitches))
}
