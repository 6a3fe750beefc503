//! Collection lists: the unit of batch transformation
//!
//! A `CollectionList` is an ordered sequence of collections, each free to be
//! a segment or a set. Every operation returns a new list.

use super::collection::{Collection, Order};
use super::operator::Operator;
use super::pattern::Pattern;
use super::pitch::{Item, ItemKind};
use super::registration::Registration;
use crate::errors::{PitchError, Result};
use crate::makers::Cursor;
use crate::sequence::{self, Overhang};
use crate::spacing::{ArpeggiationSpacingSpecifier, ChordalSpacingSpecifier, Direction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Passes `accumulate` may make before giving up on identity
const ACCUMULATE_BOUND: usize = 999;

/// Result of `CollectionList::partition`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Partition {
    /// One list per group
    Groups(Vec<CollectionList>),
    /// One joined collection per group
    Joined(CollectionList),
}

impl Partition {
    pub fn into_groups(self) -> Vec<CollectionList> {
        match self {
            Partition::Groups(groups) => groups,
            Partition::Joined(joined) => joined
                .into_iter()
                .map(|collection| CollectionList::new(vec![collection]))
                .collect(),
        }
    }
}

/// Which granularity a duplicate/repeat query inspects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    /// Whole collections compared with each other
    Collections,
    /// Items within each collection
    Within,
    /// Items across the flattened list
    Flattened,
}

impl Level {
    fn parse(level: i32) -> Result<Self> {
        match level {
            0 => Ok(Level::Collections),
            1 => Ok(Level::Within),
            -1 => Ok(Level::Flattened),
            other => Err(PitchError::InvalidLevel(other)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionList {
    collections: Vec<Collection>,
}

impl CollectionList {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self { collections }
    }

    pub fn pitch_segments<P: Into<super::Pitch>>(
        cells: impl IntoIterator<Item = impl IntoIterator<Item = P>>,
    ) -> Self {
        Self::new(cells.into_iter().map(Collection::pitch_segment).collect())
    }

    pub fn pitch_class_segments<P: Into<super::PitchClass>>(
        cells: impl IntoIterator<Item = impl IntoIterator<Item = P>>,
    ) -> Self {
        Self::new(cells.into_iter().map(Collection::pitch_class_segment).collect())
    }

    pub fn pitch_class_sets<P: Into<super::PitchClass>>(
        cells: impl IntoIterator<Item = impl IntoIterator<Item = P>>,
    ) -> Self {
        Self::new(cells.into_iter().map(Collection::pitch_class_set).collect())
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Collection> {
        self.collections.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Collection> {
        self.collections.iter()
    }

    pub fn as_slice(&self) -> &[Collection] {
        &self.collections
    }

    pub fn into_inner(self) -> Vec<Collection> {
        self.collections
    }

    /// Every item of every collection, in order
    pub fn flatten(&self) -> Vec<Item> {
        self.collections
            .iter()
            .flat_map(Collection::to_items)
            .collect()
    }

    /// Total item count across all collections
    pub fn item_count(&self) -> usize {
        self.collections.iter().map(Collection::len).sum()
    }

    /// Map every collection
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(&Collection) -> Collection,
    {
        Self::new(self.collections.iter().map(f).collect())
    }

    /// Map the collections selected by `pattern`; the rest pass through
    pub fn map_selected<F>(&self, pattern: &Pattern, mut f: F) -> Self
    where
        F: FnMut(&Collection) -> Collection,
    {
        let length = self.len();
        Self::new(
            self.collections
                .iter()
                .enumerate()
                .map(|(index, collection)| {
                    if pattern.matches_index(index, length) {
                        f(collection)
                    } else {
                        collection.clone()
                    }
                })
                .collect(),
        )
    }

    /// Fallible `map_selected`; the first error wins
    pub fn try_map_selected<F>(&self, pattern: &Pattern, mut f: F) -> Result<Self>
    where
        F: FnMut(&Collection) -> Result<Collection>,
    {
        let length = self.len();
        self.collections
            .iter()
            .enumerate()
            .map(|(index, collection)| {
                if pattern.matches_index(index, length) {
                    f(collection)
                } else {
                    Ok(collection.clone())
                }
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Concatenate every collection into one, under the first one's order
    pub fn join(&self) -> Result<Self> {
        let Some((first, rest)) = self.collections.split_first() else {
            return Ok(Self::default());
        };
        let joined = rest
            .iter()
            .try_fold(first.clone(), |joined, collection| joined.join(collection))?;
        Ok(Self::new(vec![joined]))
    }

    /// Group consecutive collections by `counts`
    pub fn partition(
        &self,
        counts: &[usize],
        cyclic: bool,
        join: bool,
        overhang: Overhang,
    ) -> Result<Partition> {
        let groups: Vec<Self> =
            sequence::partition_by_counts(&self.collections, counts, cyclic, overhang)?
                .into_iter()
                .map(Self::new)
                .collect();
        if !join {
            return Ok(Partition::Groups(groups));
        }
        let joined = groups
            .iter()
            .map(|group| group.join())
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flat_map(Self::into_inner)
            .collect();
        Ok(Partition::Joined(Self::new(joined)))
    }

    /// Re-slice the flattened items, read cyclically, into collections of
    /// the given sizes
    ///
    /// With `exact`, the total read must be a whole multiple of the item
    /// count so the read ends where the source does.
    pub fn read(&self, counts: &[usize], exact: bool) -> Result<Self> {
        let items = self.flatten();
        let total: usize = counts.iter().sum();
        if items.is_empty() {
            if total == 0 {
                return Ok(Self::new(
                    counts
                        .iter()
                        .map(|_| Collection::empty(Order::Segment, ItemKind::PitchClass))
                        .collect(),
                ));
            }
            return Err(PitchError::InexactRead {
                read: total,
                length: 0,
            });
        }
        if exact && total % items.len() != 0 {
            return Err(PitchError::InexactRead {
                read: total,
                length: items.len(),
            });
        }

        let (order, kind) = self
            .collections
            .first()
            .map(|first| (first.order(), first.kind()))
            .unwrap_or((Order::Segment, ItemKind::PitchClass));
        let mut stream = items.iter().cycle();
        counts
            .iter()
            .map(|&count| {
                let chunk: Vec<Item> = stream.by_ref().take(count).copied().collect();
                Collection::from_items(order, kind, &chunk)
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Apply `operators` cyclically, appending each resulting list
    ///
    /// Without `count`, stop as soon as a pass reproduces this list. With
    /// `count`, the result holds exactly `count` lists (this one first).
    pub fn accumulate(&self, operators: &[Operator], count: Option<usize>) -> Result<Self> {
        let identity = [Operator::Transposition(0.0)];
        let operators = if operators.is_empty() {
            &identity[..]
        } else {
            operators
        };

        let mut result = self.collections.clone();
        let mut current = self.clone();
        match count {
            Some(count) => {
                for operator in operators.iter().cycle().take(count.saturating_sub(1)) {
                    current = current.map(|collection| operator.apply(collection));
                    result.extend(current.iter().cloned());
                }
                if count == 0 {
                    result.clear();
                }
            }
            None => {
                let mut reached_identity = false;
                for operator in operators.iter().cycle().take(ACCUMULATE_BOUND) {
                    current = current.map(|collection| operator.apply(collection));
                    if current == *self {
                        reached_identity = true;
                        break;
                    }
                    result.extend(current.iter().cloned());
                }
                if !reached_identity {
                    return Err(PitchError::IterationBoundExceeded {
                        operation: "accumulate",
                        bound: ACCUMULATE_BOUND,
                    });
                }
            }
        }
        Ok(Self::new(result))
    }

    /// Helianthate the collections: inner rotation by multiples of `m`,
    /// outer rotation by multiples of `n`
    pub fn helianthate(&self, n: i64, m: i64) -> Result<Self> {
        sequence::helianthate(&self.collections, n, m).map(Self::new)
    }

    /// Rotate the list itself right by `n`
    pub fn rotate(&self, n: i64) -> Self {
        Self::new(sequence::rotate(&self.collections, n))
    }

    /// The list repeated `n` times
    pub fn repeat(&self, n: usize) -> Self {
        Self::new(
            std::iter::repeat(self.collections.iter().cloned())
                .take(n)
                .flatten()
                .collect(),
        )
    }

    /// Keep the collections selected by `pattern`
    pub fn retain(&self, pattern: &Pattern) -> Self {
        self.filter_by(pattern, true)
    }

    /// Drop the collections selected by `pattern`
    pub fn remove(&self, pattern: &Pattern) -> Self {
        self.filter_by(pattern, false)
    }

    fn filter_by(&self, pattern: &Pattern, keep: bool) -> Self {
        let length = self.len();
        Self::new(
            self.collections
                .iter()
                .enumerate()
                .filter(|(index, _)| pattern.matches_index(*index, length) == keep)
                .map(|(_, collection)| collection.clone())
                .collect(),
        )
    }

    pub fn to_pitches(&self) -> Self {
        self.map(Collection::to_pitches)
    }

    pub fn to_pitch_classes(&self) -> Self {
        self.map(Collection::to_pitch_classes)
    }

    pub fn transpose(&self, semitones: f64) -> Self {
        self.map(|collection| collection.transpose(semitones))
    }

    pub fn invert(&self, axis: Option<f64>) -> Self {
        self.map(|collection| collection.invert(axis))
    }

    pub fn register(&self, registration: &Registration) -> Result<Self> {
        self.try_map_selected(&Pattern::All, |collection| collection.register(registration))
    }

    pub fn arpeggiate_up(&self, pattern: Pattern) -> Self {
        ArpeggiationSpacingSpecifier::new()
            .with_direction(Direction::Up)
            .with_pattern(pattern)
            .apply(self)
    }

    pub fn arpeggiate_down(&self, pattern: Pattern) -> Self {
        ArpeggiationSpacingSpecifier::new()
            .with_direction(Direction::Down)
            .with_pattern(pattern)
            .apply(self)
    }

    pub fn space_up(
        &self,
        bass: Option<f64>,
        soprano: Option<f64>,
        semitones: Option<f64>,
        pattern: Pattern,
    ) -> Result<Self> {
        self.chordal(Direction::Up, bass, soprano, semitones, pattern)
    }

    pub fn space_down(
        &self,
        bass: Option<f64>,
        soprano: Option<f64>,
        semitones: Option<f64>,
        pattern: Pattern,
    ) -> Result<Self> {
        self.chordal(Direction::Down, bass, soprano, semitones, pattern)
    }

    fn chordal(
        &self,
        direction: Direction,
        bass: Option<f64>,
        soprano: Option<f64>,
        semitones: Option<f64>,
        pattern: Pattern,
    ) -> Result<Self> {
        let specifier = ChordalSpacingSpecifier {
            bass: bass.map(Into::into),
            soprano: soprano.map(Into::into),
            direction,
            minimum_semitones: semitones,
            pattern,
        };
        specifier.apply(self)
    }

    pub fn bass_to_octave(&self, n: i32, pattern: &Pattern) -> Self {
        self.map_selected(pattern, |collection| collection.bass_to_octave(n))
    }

    pub fn center_to_octave(&self, n: i32, pattern: &Pattern) -> Self {
        self.map_selected(pattern, |collection| collection.center_to_octave(n))
    }

    pub fn soprano_to_octave(&self, n: i32, pattern: &Pattern) -> Self {
        self.map_selected(pattern, |collection| collection.soprano_to_octave(n))
    }

    /// True when any two members are equal (order-insensitive)
    ///
    /// `level` 0 compares whole collections, 1 looks inside each collection
    /// and -1 looks across the flattened items.
    pub fn has_duplicates(&self, level: i32) -> Result<bool> {
        Ok(match Level::parse(level)? {
            Level::Collections => {
                let unique: HashSet<&Collection> = self.collections.iter().collect();
                unique.len() < self.len()
            }
            Level::Within => self.collections.iter().any(Collection::has_duplicates),
            Level::Flattened => {
                let items = self.flatten();
                let unique: HashSet<&Item> = items.iter().collect();
                unique.len() < items.len()
            }
        })
    }

    /// True when any two adjacent members are equal (order-sensitive)
    pub fn has_repeats(&self, level: i32) -> Result<bool> {
        Ok(match Level::parse(level)? {
            Level::Collections => self.collections.windows(2).any(|pair| pair[0] == pair[1]),
            Level::Within => self.collections.iter().any(Collection::has_repeats),
            Level::Flattened => self.flatten().windows(2).any(|pair| pair[0] == pair[1]),
        })
    }

    /// Remove members equal to an earlier one at `level`
    pub fn remove_duplicates(&self, level: i32) -> Result<Self> {
        match Level::parse(level)? {
            Level::Collections => {
                let mut seen = HashSet::new();
                Ok(Self::new(
                    self.collections
                        .iter()
                        .filter(|collection| seen.insert(*collection))
                        .cloned()
                        .collect(),
                ))
            }
            Level::Within => Ok(self.map(Collection::remove_duplicates)),
            Level::Flattened => {
                let mut seen = HashSet::new();
                self.filter_items(|item| seen.insert(item))
            }
        }
    }

    /// Remove members equal to their predecessor at `level`
    pub fn remove_repeats(&self, level: i32) -> Result<Self> {
        match Level::parse(level)? {
            Level::Collections => {
                let mut collections = self.collections.clone();
                collections.dedup();
                Ok(Self::new(collections))
            }
            Level::Within => Ok(self.map(Collection::remove_repeats)),
            Level::Flattened => {
                let mut previous: Option<Item> = None;
                self.filter_items(|item| previous.replace(item) != Some(item))
            }
        }
    }

    /// Keep items accepted by `keep`, visited in flattened order, preserving
    /// each collection's order and kind
    fn filter_items<F>(&self, mut keep: F) -> Result<Self>
    where
        F: FnMut(Item) -> bool,
    {
        self.collections
            .iter()
            .map(|collection| {
                let kept: Vec<Item> = collection
                    .to_items()
                    .into_iter()
                    .filter(|item| keep(*item))
                    .collect();
                Collection::from_items(collection.order(), collection.kind(), &kept)
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Cursor over the collections
    pub fn cursor(&self, cyclic: bool) -> Cursor {
        Cursor::new(self.clone(), cyclic)
    }
}

impl From<Vec<Collection>> for CollectionList {
    fn from(collections: Vec<Collection>) -> Self {
        Self::new(collections)
    }
}

impl FromIterator<Collection> for CollectionList {
    fn from_iter<I: IntoIterator<Item = Collection>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for CollectionList {
    type Item = Collection;
    type IntoIter = std::vec::IntoIter<Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.into_iter()
    }
}

impl<'a> IntoIterator for &'a CollectionList {
    type Item = &'a Collection;
    type IntoIter = std::slice::Iter<'a, Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}

impl std::ops::Index<usize> for CollectionList {
    type Output = Collection;

    fn index(&self, index: usize) -> &Collection {
        &self.collections[index]
    }
}

impl fmt::Display for CollectionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let collections: Vec<String> = self.collections.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", collections.join(", "))
    }
}
