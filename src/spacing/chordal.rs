//! Chordal spacing: constrained voicings
//!
//! The voicing is found by scanning semitone by semitone away from the seed
//! voice. Whenever the candidate's pitch-class is still waiting to be placed
//! it is consumed and the candidate jumps by the minimum gap; otherwise the
//! candidate moves on by one semitone. The ordered result is then laid out
//! as a tight spiral.

use super::{realize, respaced, Direction};
use crate::errors::{PitchError, Result};
use crate::models::{Collection, CollectionList, Pattern, PitchClass};
use serde::{Deserialize, Serialize};

/// Scan steps allowed before the voicing search is declared stuck
const SCAN_BOUND: usize = 999;

/// Quarter-tones per semitone
const SEMITONE: i32 = 2;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordalSpacingSpecifier {
    pub bass: Option<PitchClass>,
    pub soprano: Option<PitchClass>,
    pub direction: Direction,
    /// Smallest interval between adjacent voices, one semitone when absent
    pub minimum_semitones: Option<f64>,
    pub pattern: Pattern,
}

impl ChordalSpacingSpecifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bass(mut self, bass: impl Into<PitchClass>) -> Self {
        self.bass = Some(bass.into());
        self
    }

    pub fn with_soprano(mut self, soprano: impl Into<PitchClass>) -> Self {
        self.soprano = Some(soprano.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_minimum_semitones(mut self, semitones: f64) -> Self {
        self.minimum_semitones = Some(semitones);
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn apply(&self, collections: &CollectionList) -> Result<CollectionList> {
        collections.try_map_selected(&self.pattern, |collection| self.space(collection))
    }

    /// Absent input is a no-op rather than an error
    pub fn call(&self, collections: Option<&CollectionList>) -> Result<Option<CollectionList>> {
        collections.map(|collections| self.apply(collections)).transpose()
    }

    /// Space one collection regardless of the pattern
    pub fn space(&self, collection: &Collection) -> Result<Collection> {
        let voicing = self.voicing(collection)?;
        Ok(respaced(collection, realize(&voicing, self.direction)))
    }

    /// Order the collection's pitch-classes bottom-up (or top-down) as voices
    pub fn voicing(&self, collection: &Collection) -> Result<Vec<PitchClass>> {
        let source = collection.pitch_class_sequence();
        let mut inner = source.clone();
        for (role, declared) in [("bass", self.bass), ("soprano", self.soprano)] {
            let Some(pitch_class) = declared else {
                continue;
            };
            if !source.contains(&pitch_class) {
                return Err(PitchError::NotInCollection {
                    role,
                    pitch_class: pitch_class.to_string(),
                    collection: collection.to_string(),
                });
            }
            if let Some(index) = inner.iter().position(|&p| p == pitch_class) {
                inner.remove(index);
            }
        }

        // the first outer voice seeds the scan, the second closes it
        let (first, last, step) = match self.direction {
            Direction::Up => (self.bass, self.soprano, SEMITONE),
            Direction::Down => (self.soprano, self.bass, -SEMITONE),
        };
        let (seed, closing) = match first {
            Some(first) => (first, last),
            None => {
                let fallback = match self.direction {
                    Direction::Up if !inner.is_empty() => Some(inner.remove(0)),
                    Direction::Down => inner.pop(),
                    Direction::Up => None,
                };
                match (fallback, last) {
                    (Some(seed), closing) => (seed, closing),
                    (None, Some(last)) => (last, None),
                    (None, None) => return Ok(Vec::new()),
                }
            }
        };

        let gap = self.gap() * step.signum();
        let (mut voicing, steps) = scan(seed, inner, gap, step, SCAN_BOUND)?;
        voicing.extend(closing);

        log::debug!(
            "voiced {} as {:?} ({} scan steps)",
            collection,
            voicing.iter().map(ToString::to_string).collect::<Vec<_>>(),
            steps
        );
        Ok(voicing)
    }

    fn gap(&self) -> i32 {
        let semitones = self.minimum_semitones.unwrap_or(1.0);
        ((semitones * SEMITONE as f64).round() as i32).max(1)
    }
}

/// Consume `inner` voices in scan order from `seed`, checking at most `bound` candidates
///
/// Returns the voicing, seed first, and the number of candidates checked.
fn scan(
    seed: PitchClass,
    mut inner: Vec<PitchClass>,
    gap: i32,
    step: i32,
    bound: usize,
) -> Result<(Vec<PitchClass>, usize)> {
    let mut voicing = vec![seed];
    let mut candidate = seed.quarter_tones() + gap;
    let mut steps = 0;
    while !inner.is_empty() {
        if steps >= bound {
            return Err(PitchError::ScanBoundExceeded {
                bound,
                remaining: inner.iter().map(ToString::to_string).collect(),
            });
        }
        steps += 1;
        let pitch_class = PitchClass::from_quarter_tones(candidate);
        match inner.iter().position(|&p| p == pitch_class) {
            Some(index) => {
                voicing.push(inner.remove(index));
                candidate += gap;
            }
            None => candidate += step,
        }
    }
    Ok((voicing, steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(pitch_classes: &[PitchClass]) -> Vec<f64> {
        pitch_classes.iter().map(PitchClass::number).collect()
    }

    #[test]
    fn test_voicing_up_with_bass_and_soprano() {
        let specifier = ChordalSpacingSpecifier::new().with_bass(6).with_soprano(7);
        let set = Collection::pitch_class_set([-6, -3, -5, -1, -7]);
        let voicing = specifier.voicing(&set).unwrap();
        assert_eq!(numbers(&voicing), vec![6.0, 9.0, 11.0, 5.0, 7.0]);
    }

    #[test]
    fn test_voicing_down_with_bass_and_soprano() {
        let specifier = ChordalSpacingSpecifier::new()
            .with_bass(6)
            .with_soprano(7)
            .with_direction(Direction::Down);
        let set = Collection::pitch_class_set([-6, -3, -5, -1, -7]);
        let voicing = specifier.voicing(&set).unwrap();
        assert_eq!(numbers(&voicing), vec![7.0, 5.0, 11.0, 9.0, 6.0]);
    }

    #[test]
    fn test_seed_falls_back_to_inner_voice() {
        let specifier = ChordalSpacingSpecifier::new();
        let voicing = specifier.voicing(&Collection::pitch_class_set([0, 4, 7])).unwrap();
        assert_eq!(numbers(&voicing), vec![0.0, 4.0, 7.0]);

        let down = specifier.with_direction(Direction::Down);
        let voicing = down.voicing(&Collection::pitch_class_set([0, 4, 7])).unwrap();
        assert_eq!(numbers(&voicing), vec![7.0, 4.0, 0.0]);
    }

    #[test]
    fn test_lone_soprano_is_not_doubled() {
        let specifier = ChordalSpacingSpecifier::new().with_soprano(3);
        let voicing = specifier.voicing(&Collection::pitch_class_set([3])).unwrap();
        assert_eq!(numbers(&voicing), vec![3.0]);
    }

    #[test]
    fn test_minimum_semitones_reorders_voices() {
        let specifier = ChordalSpacingSpecifier::new()
            .with_bass(0)
            .with_minimum_semitones(5.0);
        let spaced = specifier
            .space(&Collection::pitch_class_segment([0, 1, 2, 7]))
            .unwrap();
        assert_eq!(spaced.numbers(), vec![0.0, 7.0, 13.0, 14.0]);
    }

    #[test]
    fn test_missing_bass_is_named() {
        let specifier = ChordalSpacingSpecifier::new().with_bass(2);
        let err = specifier
            .voicing(&Collection::pitch_class_set([0, 4, 7]))
            .unwrap_err();
        assert_eq!(err.to_string(), "bass 2 not in collection {0, 4, 7}");
    }

    #[test]
    fn test_quarter_tone_inner_voice_hits_scan_bound() {
        let specifier = ChordalSpacingSpecifier::new().with_bass(0);
        let segment = Collection::from_numbers(
            crate::models::Order::Segment,
            crate::models::ItemKind::PitchClass,
            &[0.0, 4.5],
        );
        assert!(matches!(
            specifier.voicing(&segment),
            Err(PitchError::ScanBoundExceeded { bound: 999, .. })
        ));
    }

    #[test]
    fn test_scan_checks_at_most_bound_candidates() {
        // 1 through 11 ascending: eleven candidates before 11 is placed
        let seed = PitchClass::from(0);
        let inner = vec![PitchClass::from(11)];
        let (voicing, steps) = scan(seed, inner.clone(), SEMITONE, SEMITONE, 11).unwrap();
        assert_eq!(numbers(&voicing), vec![0.0, 11.0]);
        assert_eq!(steps, 11);
        assert_eq!(
            scan(seed, inner, SEMITONE, SEMITONE, 10),
            Err(PitchError::ScanBoundExceeded {
                bound: 10,
                remaining: vec!["11".to_string()],
            })
        );
    }

    #[test]
    fn test_empty_collection() {
        let spaced = ChordalSpacingSpecifier::new()
            .space(&Collection::pitch_class_set(Vec::<i32>::new()))
            .unwrap();
        assert!(spaced.is_empty());
    }
}
