//! Pitch and pitch-class collections
//!
//! A `Collection` pairs an `Order` (segment or set) with homogeneous `Items`
//! (pitches or pitch-classes), giving the four collection variants one
//! shared set of operations. Segments keep order and duplicates; sets are
//! stored sorted ascending with duplicates removed, so equality between
//! sets ignores the order they were built in.

use super::pitch::{Item, ItemKind, Pitch, PitchClass};
use super::registration::Registration;
use crate::errors::{PitchError, Result};
use crate::sequence::{self, Rotate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Ordered, duplicates allowed
    #[default]
    Segment,
    /// Unordered, duplicates removed
    Set,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Items {
    Pitches(Vec<Pitch>),
    PitchClasses(Vec<PitchClass>),
}

impl Items {
    pub fn kind(&self) -> ItemKind {
        match self {
            Items::Pitches(_) => ItemKind::Pitch,
            Items::PitchClasses(_) => ItemKind::PitchClass,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Items::Pitches(pitches) => pitches.len(),
            Items::PitchClasses(pitch_classes) => pitch_classes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn empty(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Pitch => Items::Pitches(Vec::new()),
            ItemKind::PitchClass => Items::PitchClasses(Vec::new()),
        }
    }

    fn to_vec(&self) -> Vec<Item> {
        match self {
            Items::Pitches(pitches) => pitches.iter().copied().map(Item::Pitch).collect(),
            Items::PitchClasses(pitch_classes) => {
                pitch_classes.iter().copied().map(Item::PitchClass).collect()
            }
        }
    }

    fn map_vec<F, G>(&self, on_pitches: F, on_pitch_classes: G) -> Self
    where
        F: FnOnce(&[Pitch]) -> Vec<Pitch>,
        G: FnOnce(&[PitchClass]) -> Vec<PitchClass>,
    {
        match self {
            Items::Pitches(pitches) => Items::Pitches(on_pitches(pitches)),
            Items::PitchClasses(pitch_classes) => {
                Items::PitchClasses(on_pitch_classes(pitch_classes))
            }
        }
    }

    fn normalize(self, order: Order) -> Self {
        fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
            items.sort();
            items.dedup();
            items
        }
        match (order, self) {
            (Order::Segment, items) => items,
            (Order::Set, Items::Pitches(pitches)) => Items::Pitches(sorted(pitches)),
            (Order::Set, Items::PitchClasses(pitch_classes)) => {
                Items::PitchClasses(sorted(pitch_classes))
            }
        }
    }
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    order: Order,
    items: Items,
}

impl From<RawCollection> for Collection {
    fn from(raw: RawCollection) -> Self {
        Collection::new(raw.order, raw.items)
    }
}

/// Segment or set of pitches or pitch-classes
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawCollection")]
pub struct Collection {
    order: Order,
    items: Items,
}

impl Collection {
    pub fn new(order: Order, items: Items) -> Self {
        Self {
            order,
            items: items.normalize(order),
        }
    }

    pub fn empty(order: Order, kind: ItemKind) -> Self {
        Self::new(order, Items::empty(kind))
    }

    pub fn pitch_segment<P: Into<Pitch>>(items: impl IntoIterator<Item = P>) -> Self {
        Self::new(
            Order::Segment,
            Items::Pitches(items.into_iter().map(Into::into).collect()),
        )
    }

    pub fn pitch_set<P: Into<Pitch>>(items: impl IntoIterator<Item = P>) -> Self {
        Self::new(
            Order::Set,
            Items::Pitches(items.into_iter().map(Into::into).collect()),
        )
    }

    pub fn pitch_class_segment<P: Into<PitchClass>>(items: impl IntoIterator<Item = P>) -> Self {
        Self::new(
            Order::Segment,
            Items::PitchClasses(items.into_iter().map(Into::into).collect()),
        )
    }

    pub fn pitch_class_set<P: Into<PitchClass>>(items: impl IntoIterator<Item = P>) -> Self {
        Self::new(
            Order::Set,
            Items::PitchClasses(items.into_iter().map(Into::into).collect()),
        )
    }

    /// Build from dynamically-typed items, all of which must be `kind`
    pub fn from_items(order: Order, kind: ItemKind, items: &[Item]) -> Result<Self> {
        let wrong = |item: &Item| PitchError::WrongItemKind {
            expected: kind.name(),
            found: item.kind().name(),
            item: item.to_string(),
        };
        let items = match kind {
            ItemKind::Pitch => Items::Pitches(
                items
                    .iter()
                    .map(|item| match item {
                        Item::Pitch(pitch) => Ok(*pitch),
                        other => Err(wrong(other)),
                    })
                    .collect::<Result<_>>()?,
            ),
            ItemKind::PitchClass => Items::PitchClasses(
                items
                    .iter()
                    .map(|item| match item {
                        Item::PitchClass(pitch_class) => Ok(*pitch_class),
                        other => Err(wrong(other)),
                    })
                    .collect::<Result<_>>()?,
            ),
        };
        Ok(Self::new(order, items))
    }

    /// Build from raw numbers read as `kind`
    pub fn from_numbers(order: Order, kind: ItemKind, numbers: &[f64]) -> Self {
        let items = match kind {
            ItemKind::Pitch => Items::Pitches(numbers.iter().map(|&n| Pitch::new(n)).collect()),
            ItemKind::PitchClass => {
                Items::PitchClasses(numbers.iter().map(|&n| PitchClass::new(n)).collect())
            }
        };
        Self::new(order, items)
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn kind(&self) -> ItemKind {
        self.items.kind()
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    /// Items in stored order, tagged with their kind
    pub fn to_items(&self) -> Vec<Item> {
        self.items.to_vec()
    }

    pub fn numbers(&self) -> Vec<f64> {
        self.to_items().iter().map(Item::number).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_segment(&self) -> bool {
        self.order == Order::Segment
    }

    pub fn is_set(&self) -> bool {
        self.order == Order::Set
    }

    /// Same items under a different order
    pub fn with_order(&self, order: Order) -> Self {
        Self::new(order, self.items.clone())
    }

    /// Realize pitch-classes in octave 4; pitches pass through
    pub fn to_pitches(&self) -> Self {
        let items = match &self.items {
            Items::Pitches(pitches) => Items::Pitches(pitches.clone()),
            Items::PitchClasses(pitch_classes) => {
                Items::Pitches(pitch_classes.iter().map(PitchClass::to_pitch).collect())
            }
        };
        Self::new(self.order, items)
    }

    /// Reduce to pitch-classes, discarding register
    pub fn to_pitch_classes(&self) -> Self {
        let items = match &self.items {
            Items::Pitches(pitches) => {
                Items::PitchClasses(pitches.iter().map(Pitch::to_pitch_class).collect())
            }
            Items::PitchClasses(pitch_classes) => Items::PitchClasses(pitch_classes.clone()),
        };
        Self::new(self.order, items)
    }

    /// Pitch-class sequence used as spacing input: segments keep their
    /// order, sets come out ascending
    pub fn pitch_class_sequence(&self) -> Vec<PitchClass> {
        match self.to_pitch_classes().items {
            Items::PitchClasses(pitch_classes) => pitch_classes,
            Items::Pitches(_) => Vec::new(),
        }
    }

    /// Register-bearing pitches, realizing pitch-classes in octave 4
    pub fn pitch_sequence(&self) -> Vec<Pitch> {
        match self.to_pitches().items {
            Items::Pitches(pitches) => pitches,
            Items::PitchClasses(_) => Vec::new(),
        }
    }

    pub fn transpose(&self, semitones: f64) -> Self {
        let items = self.items.map_vec(
            |pitches| pitches.iter().map(|p| p.transpose(semitones)).collect(),
            |pitch_classes| pitch_classes.iter().map(|p| p.transpose(semitones)).collect(),
        );
        Self::new(self.order, items)
    }

    /// Invert around `axis`, or around the first item when `axis` is `None`
    pub fn invert(&self, axis: Option<f64>) -> Self {
        let Some(axis) = axis.or_else(|| self.to_items().first().map(Item::number)) else {
            return self.clone();
        };
        let items = self.items.map_vec(
            |pitches| pitches.iter().map(|p| p.invert(Pitch::new(axis))).collect(),
            |pitch_classes| {
                pitch_classes
                    .iter()
                    .map(|p| p.invert(PitchClass::new(axis)))
                    .collect()
            },
        );
        Self::new(self.order, items)
    }

    /// Multiply item numbers by `n`; pitch-classes reduce modulo 12
    pub fn multiply(&self, n: i32) -> Self {
        let items = self.items.map_vec(
            |pitches| {
                pitches
                    .iter()
                    .map(|p| Pitch::from_quarter_tones(p.quarter_tones() * n))
                    .collect()
            },
            |pitch_classes| pitch_classes.iter().map(|p| p.multiply(n)).collect(),
        );
        Self::new(self.order, items)
    }

    /// Rotate right by `n`; sets are returned unchanged
    pub fn rotate(&self, n: i64) -> Self {
        if self.is_set() {
            return self.clone();
        }
        let items = self.items.map_vec(
            |pitches| sequence::rotate(pitches, n),
            |pitch_classes| sequence::rotate(pitch_classes, n),
        );
        Self::new(self.order, items)
    }

    /// Reverse a segment; sets are returned unchanged
    pub fn retrograde(&self) -> Self {
        if self.is_set() {
            return self.clone();
        }
        let items = self.items.map_vec(
            |pitches| pitches.iter().rev().copied().collect(),
            |pitch_classes| pitch_classes.iter().rev().copied().collect(),
        );
        Self::new(self.order, items)
    }

    /// Concatenate `other` onto this collection, keeping this order
    pub fn join(&self, other: &Collection) -> Result<Self> {
        let items = match (&self.items, &other.items) {
            (Items::Pitches(left), Items::Pitches(right)) => {
                Items::Pitches(left.iter().chain(right).copied().collect())
            }
            (Items::PitchClasses(left), Items::PitchClasses(right)) => {
                Items::PitchClasses(left.iter().chain(right).copied().collect())
            }
            (left, right) => {
                return Err(PitchError::MixedItemKinds {
                    expected: left.kind().name(),
                    found: right.kind().name(),
                })
            }
        };
        Ok(Self::new(self.order, items))
    }

    /// Apply `registration` to every item; pitch-classes start in octave 4
    pub fn register(&self, registration: &Registration) -> Result<Self> {
        let pitches = self
            .pitch_sequence()
            .into_iter()
            .map(|pitch| registration.register(pitch))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(self.order, Items::Pitches(pitches)))
    }

    /// Octave-transpose so the lowest pitch sits in octave `n`
    pub fn bass_to_octave(&self, n: i32) -> Self {
        let pitches = self.pitch_sequence();
        match pitches.iter().min() {
            Some(bass) => self.shift_octaves(&pitches, n - bass.octave()),
            None => self.to_pitches(),
        }
    }

    /// Octave-transpose so the highest pitch sits in octave `n`
    pub fn soprano_to_octave(&self, n: i32) -> Self {
        let pitches = self.pitch_sequence();
        match pitches.iter().max() {
            Some(soprano) => self.shift_octaves(&pitches, n - soprano.octave()),
            None => self.to_pitches(),
        }
    }

    /// Octave-transpose so the midpoint of lowest and highest sits in octave `n`
    pub fn center_to_octave(&self, n: i32) -> Self {
        let pitches = self.pitch_sequence();
        match (pitches.iter().min(), pitches.iter().max()) {
            (Some(bass), Some(soprano)) => {
                let center = Pitch::new((bass.number() + soprano.number()) / 2.0);
                self.shift_octaves(&pitches, n - center.octave())
            }
            _ => self.to_pitches(),
        }
    }

    fn shift_octaves(&self, pitches: &[Pitch], octaves: i32) -> Self {
        let pitches = pitches.iter().map(|p| p.transpose_octaves(octaves)).collect();
        Self::new(self.order, Items::Pitches(pitches))
    }

    /// True when any two items are equal
    pub fn has_duplicates(&self) -> bool {
        let items = self.to_items();
        let unique: HashSet<&Item> = items.iter().collect();
        unique.len() < items.len()
    }

    /// True when any two adjacent items are equal
    pub fn has_repeats(&self) -> bool {
        self.to_items().windows(2).any(|pair| pair[0] == pair[1])
    }

    /// Keep the first occurrence of every item
    pub fn remove_duplicates(&self) -> Self {
        fn first_occurrences<T: Copy + Eq + std::hash::Hash>(items: &[T]) -> Vec<T> {
            let mut seen = HashSet::new();
            items.iter().copied().filter(|item| seen.insert(*item)).collect()
        }
        let items = self
            .items
            .map_vec(|p| first_occurrences(p), |p| first_occurrences(p));
        Self::new(self.order, items)
    }

    /// Collapse runs of equal adjacent items
    pub fn remove_repeats(&self) -> Self {
        fn collapse<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
            let mut result = items.to_vec();
            result.dedup();
            result
        }
        let items = self.items.map_vec(|p| collapse(p), |p| collapse(p));
        Self::new(self.order, items)
    }
}

impl Rotate for Collection {
    fn rotate(&self, n: i64) -> Self {
        Collection::rotate(self, n)
    }

    fn rotation_period(&self) -> usize {
        if self.is_set() {
            1
        } else {
            self.len().max(1)
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.order {
            Order::Segment => ('<', '>'),
            Order::Set => ('{', '}'),
        };
        let items: Vec<String> = self.to_items().iter().map(ToString::to_string).collect();
        write!(f, "{}{}{}", open, items.join(", "), close)
    }
}
