//! Pitch and pitch-class primitives
//!
//! Both are stored as whole quarter-tone counts so equality, ordering and
//! hashing stay exact. On the wire they are plain numbers (semitones, with
//! `.5` for quarter-tones).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quarter-tones per octave
const OCTAVE: i32 = 24;

/// Octave number of pitch 0 (middle C is C4)
const REFERENCE_OCTAVE: i32 = 4;

fn quarter_tones(number: f64) -> i32 {
    (number * 2.0).round() as i32
}

fn format_quarter_tones(f: &mut fmt::Formatter<'_>, quarter_tones: i32) -> fmt::Result {
    if quarter_tones % 2 == 0 {
        write!(f, "{}", quarter_tones / 2)
    } else {
        write!(f, "{}", quarter_tones as f64 / 2.0)
    }
}

/// Register-bearing pitch, in semitones from middle C
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Pitch {
    quarter_tones: i32,
}

impl Pitch {
    /// Create a pitch, rounding to the nearest quarter-tone
    pub fn new(number: f64) -> Self {
        Self {
            quarter_tones: quarter_tones(number),
        }
    }

    pub fn number(&self) -> f64 {
        self.quarter_tones as f64 / 2.0
    }

    /// Octave number, with pitch 0 in octave 4
    pub fn octave(&self) -> i32 {
        self.quarter_tones.div_euclid(OCTAVE) + REFERENCE_OCTAVE
    }

    pub fn transpose(&self, semitones: f64) -> Self {
        Self {
            quarter_tones: self.quarter_tones + quarter_tones(semitones),
        }
    }

    /// Transpose by whole octaves
    pub fn transpose_octaves(&self, octaves: i32) -> Self {
        Self {
            quarter_tones: self.quarter_tones + octaves * OCTAVE,
        }
    }

    /// Mirror around `axis`
    pub fn invert(&self, axis: Pitch) -> Self {
        Self {
            quarter_tones: 2 * axis.quarter_tones - self.quarter_tones,
        }
    }

    pub fn to_pitch_class(&self) -> PitchClass {
        PitchClass::from_quarter_tones(self.quarter_tones)
    }

    /// Signed interval to `other` in semitones
    pub fn interval_to(&self, other: Pitch) -> f64 {
        (other.quarter_tones - self.quarter_tones) as f64 / 2.0
    }

    pub(crate) fn quarter_tones(&self) -> i32 {
        self.quarter_tones
    }

    pub(crate) fn from_quarter_tones(quarter_tones: i32) -> Self {
        Self { quarter_tones }
    }
}

impl From<f64> for Pitch {
    fn from(number: f64) -> Self {
        Pitch::new(number)
    }
}

impl From<i32> for Pitch {
    fn from(number: i32) -> Self {
        Self {
            quarter_tones: number * 2,
        }
    }
}

impl From<Pitch> for f64 {
    fn from(pitch: Pitch) -> Self {
        pitch.number()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_quarter_tones(f, self.quarter_tones)
    }
}

/// Octave-equivalence class of a pitch, canonical in `[0, 12)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct PitchClass {
    quarter_tones: i32,
}

impl PitchClass {
    /// Create a pitch-class, reducing modulo 12
    pub fn new(number: f64) -> Self {
        Self::from_quarter_tones(quarter_tones(number))
    }

    pub(crate) fn from_quarter_tones(quarter_tones: i32) -> Self {
        Self {
            quarter_tones: quarter_tones.rem_euclid(OCTAVE),
        }
    }

    pub fn number(&self) -> f64 {
        self.quarter_tones as f64 / 2.0
    }

    pub fn transpose(&self, semitones: f64) -> Self {
        Self::from_quarter_tones(self.quarter_tones + quarter_tones(semitones))
    }

    /// Mirror around `axis`, modulo 12
    pub fn invert(&self, axis: PitchClass) -> Self {
        Self::from_quarter_tones(2 * axis.quarter_tones - self.quarter_tones)
    }

    /// Multiply modulo 12 (M5 and M7 are the usual operands)
    pub fn multiply(&self, n: i32) -> Self {
        Self::from_quarter_tones(self.quarter_tones * n)
    }

    /// Realize in octave 4, i.e. as a pitch in `[0, 12)`
    pub fn to_pitch(&self) -> Pitch {
        Pitch::from_quarter_tones(self.quarter_tones)
    }

    pub(crate) fn quarter_tones(&self) -> i32 {
        self.quarter_tones
    }
}

impl From<f64> for PitchClass {
    fn from(number: f64) -> Self {
        PitchClass::new(number)
    }
}

impl From<i32> for PitchClass {
    fn from(number: i32) -> Self {
        Self::from_quarter_tones(number * 2)
    }
}

impl From<PitchClass> for f64 {
    fn from(pitch_class: PitchClass) -> Self {
        pitch_class.number()
    }
}

impl From<Pitch> for PitchClass {
    fn from(pitch: Pitch) -> Self {
        pitch.to_pitch_class()
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_quarter_tones(f, self.quarter_tones)
    }
}

/// The two payload kinds a collection or tree may hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Pitch,
    PitchClass,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Pitch => "pitch",
            ItemKind::PitchClass => "pitch-class",
        }
    }

    /// Interpret a raw number as this kind
    pub fn item(&self, number: f64) -> Item {
        match self {
            ItemKind::Pitch => Item::Pitch(Pitch::new(number)),
            ItemKind::PitchClass => Item::PitchClass(PitchClass::new(number)),
        }
    }
}

/// A pitch or a pitch-class, for input whose kind is only known at runtime
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Pitch(Pitch),
    PitchClass(PitchClass),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Pitch(_) => ItemKind::Pitch,
            Item::PitchClass(_) => ItemKind::PitchClass,
        }
    }

    pub fn number(&self) -> f64 {
        match self {
            Item::Pitch(pitch) => pitch.number(),
            Item::PitchClass(pitch_class) => pitch_class.number(),
        }
    }

    pub fn transpose(&self, semitones: f64) -> Self {
        match self {
            Item::Pitch(pitch) => Item::Pitch(pitch.transpose(semitones)),
            Item::PitchClass(pitch_class) => Item::PitchClass(pitch_class.transpose(semitones)),
        }
    }

    /// Mirror around `axis`; the axis is read in this item's own kind
    pub fn invert(&self, axis: f64) -> Self {
        match self {
            Item::Pitch(pitch) => Item::Pitch(pitch.invert(Pitch::new(axis))),
            Item::PitchClass(pitch_class) => {
                Item::PitchClass(pitch_class.invert(PitchClass::new(axis)))
            }
        }
    }

    pub fn to_pitch_class(&self) -> PitchClass {
        match self {
            Item::Pitch(pitch) => pitch.to_pitch_class(),
            Item::PitchClass(pitch_class) => *pitch_class,
        }
    }
}

impl From<Pitch> for Item {
    fn from(pitch: Pitch) -> Self {
        Item::Pitch(pitch)
    }
}

impl From<PitchClass> for Item {
    fn from(pitch_class: PitchClass) -> Self {
        Item::PitchClass(pitch_class)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Pitch(pitch) => fmt::Display::fmt(pitch, f),
            Item::PitchClass(pitch_class) => fmt::Display::fmt(pitch_class, f),
        }
    }
}
