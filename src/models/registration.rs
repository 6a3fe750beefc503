//! Registration: octave placement rules keyed on pitch ranges
//!
//! Each component says "pitches in this source range go to the octave that
//! starts at this pitch". Components are tried in order; the first whose
//! source range contains the pitch wins.

use super::pitch::Pitch;
use crate::errors::{PitchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pitch interval with independently open or closed bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchRange {
    pub start: Pitch,
    pub stop: Pitch,
    pub start_inclusive: bool,
    pub stop_inclusive: bool,
}

impl PitchRange {
    /// Half-open range `[start, stop)`
    pub fn new(start: impl Into<Pitch>, stop: impl Into<Pitch>) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
            start_inclusive: true,
            stop_inclusive: false,
        }
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        let above = if self.start_inclusive {
            self.start <= pitch
        } else {
            self.start < pitch
        };
        let below = if self.stop_inclusive {
            pitch <= self.stop
        } else {
            pitch < self.stop
        };
        above && below
    }
}

impl FromStr for PitchRange {
    type Err = PitchError;

    /// Parse interval notation such as `[-39, 48)` or `(0, 12]`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PitchError::InvalidPitchRange(s.to_string());
        let trimmed = s.trim();
        let start_inclusive = match trimmed.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(invalid()),
        };
        let stop_inclusive = match trimmed.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(invalid()),
        };
        let inner = &trimmed[1..trimmed.len() - 1];
        let (start, stop) = inner.split_once(',').ok_or_else(invalid)?;
        let start: f64 = start.trim().parse().map_err(|_| invalid())?;
        let stop: f64 = stop.trim().parse().map_err(|_| invalid())?;
        if stop < start {
            return Err(invalid());
        }
        Ok(Self {
            start: Pitch::new(start),
            stop: Pitch::new(stop),
            start_inclusive,
            stop_inclusive,
        })
    }
}

impl fmt::Display for PitchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.start_inclusive { '[' } else { '(' };
        let close = if self.stop_inclusive { ']' } else { ')' };
        write!(f, "{}{}, {}{}", open, self.start, self.stop, close)
    }
}

/// One (source range, target octave start) rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationComponent {
    pub source: PitchRange,
    pub target_octave_start: Pitch,
}

impl RegistrationComponent {
    pub fn new(source: PitchRange, target_octave_start: impl Into<Pitch>) -> Self {
        Self {
            source,
            target_octave_start: target_octave_start.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub components: Vec<RegistrationComponent>,
}

impl Registration {
    pub fn new(components: Vec<RegistrationComponent>) -> Self {
        Self { components }
    }

    /// Move `pitch` into `[target, target + 12)` of the first matching component
    pub fn register(&self, pitch: Pitch) -> Result<Pitch> {
        let component = self
            .components
            .iter()
            .find(|component| component.source.contains(pitch))
            .ok_or_else(|| PitchError::NoRegistrationComponent(pitch.to_string()))?;
        let target = component.target_octave_start.quarter_tones();
        let offset = (pitch.quarter_tones() - target).rem_euclid(24);
        Ok(Pitch::from_quarter_tones(target + offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pitch_range() {
        let range: PitchRange = "[-39, 48)".parse().unwrap();
        assert!(range.contains(Pitch::from(-39)));
        assert!(!range.contains(Pitch::from(48)));
        assert_eq!(range.to_string(), "[-39, 48)");

        let closed: PitchRange = "(0, 12]".parse().unwrap();
        assert!(!closed.contains(Pitch::from(0)));
        assert!(closed.contains(Pitch::from(12)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("0, 12".parse::<PitchRange>().is_err());
        assert!("[12, 0)".parse::<PitchRange>().is_err());
        assert!("[a, 0)".parse::<PitchRange>().is_err());
    }

    #[test]
    fn test_register_splits_at_middle_c() {
        let registration = Registration::new(vec![
            RegistrationComponent::new(PitchRange::new(-48, 0), -6),
            RegistrationComponent::new(PitchRange::new(0, 48), 18),
        ]);
        assert_eq!(registration.register(Pitch::from(-1)).unwrap(), Pitch::from(-1));
        assert_eq!(registration.register(Pitch::from(-20)).unwrap(), Pitch::from(4));
        assert_eq!(registration.register(Pitch::from(2)).unwrap(), Pitch::from(26));
        assert_eq!(registration.register(Pitch::from(18)).unwrap(), Pitch::from(18));
        assert!(matches!(
            registration.register(Pitch::from(60)),
            Err(PitchError::NoRegistrationComponent(_))
        ));
    }
}
