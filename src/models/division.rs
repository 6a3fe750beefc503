//! Division: exact, non-reducing rational durations
//!
//! A division keeps the numerator and denominator it was built with, so
//! `3/6` stays distinguishable from `1/2`. It may be anchored at an absolute
//! start offset, in which case addition and subtraction act on the timespan
//! `[start, start + duration)`. The payload is carried along and never read.

use crate::errors::{PitchError, Result};
use num_integer::Integer;
use num_rational::Rational64;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Division<P = ()> {
    numerator: i64,
    denominator: i64,
    start_offset: Option<Rational64>,
    payload: P,
}

impl Division {
    /// Create an unanchored division from a (numerator, denominator) pair
    pub fn new(pair: (i64, i64)) -> Result<Self> {
        let (numerator, denominator) = pair;
        if denominator == 0 {
            return Err(PitchError::ZeroDenominator(numerator));
        }
        let (numerator, denominator) = if denominator < 0 {
            numerator
                .checked_neg()
                .zip(denominator.checked_neg())
                .ok_or_else(|| PitchError::DivisionOverflow(format!("{}/{}", numerator, denominator)))?
        } else {
            (numerator, denominator)
        };
        Ok(Self {
            numerator,
            denominator,
            start_offset: None,
            payload: (),
        })
    }

    /// Build consecutive divisions anchored by the running sum of their durations
    pub fn run(pairs: &[(i64, i64)], start: Rational64) -> Result<Vec<Self>> {
        let mut offset = start;
        let mut divisions = Vec::with_capacity(pairs.len());
        for &pair in pairs {
            let division = Division::new(pair)?.with_start_offset(offset);
            offset += division.duration();
            divisions.push(division);
        }
        Ok(divisions)
    }
}

impl<P> Division<P> {
    pub fn with_start_offset(self, start_offset: Rational64) -> Self {
        Self {
            start_offset: Some(start_offset),
            ..self
        }
    }

    pub fn without_start_offset(self) -> Self {
        Self {
            start_offset: None,
            ..self
        }
    }

    /// Attach an opaque payload, replacing any previous one
    pub fn with_payload<Q>(self, payload: Q) -> Division<Q> {
        Division {
            numerator: self.numerator,
            denominator: self.denominator,
            start_offset: self.start_offset,
            payload,
        }
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// The unreduced (numerator, denominator) pair
    pub fn pair(&self) -> (i64, i64) {
        (self.numerator, self.denominator)
    }

    /// Duration as a reduced rational
    pub fn duration(&self) -> Rational64 {
        Rational64::new(self.numerator, self.denominator)
    }

    pub fn start_offset(&self) -> Option<Rational64> {
        self.start_offset
    }

    pub fn stop_offset(&self) -> Option<Rational64> {
        self.start_offset.map(|start| start + self.duration())
    }

    /// True when both divisions are anchored and their timespans do not overlap
    pub fn is_disjoint_from<Q>(&self, other: &Division<Q>) -> bool {
        match (self.timespan(), other.timespan()) {
            (Some(left), Some(right)) => !left.intersects(&right),
            _ => false,
        }
    }

    fn timespan(&self) -> Option<Timespan> {
        self.start_offset
            .map(|start| Timespan::new(start, start + self.duration()))
    }
}

impl<P: Clone> Division<P> {
    /// Re-express at `denominator` when that is exact; otherwise unchanged
    pub fn with_denominator(&self, denominator: i64) -> Self {
        match pair_at(self.duration(), denominator) {
            Some((numerator, denominator)) => Self {
                numerator,
                denominator,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    fn rebuilt(&self, pair: (i64, i64), start_offset: Option<Rational64>) -> Self {
        Self {
            numerator: pair.0,
            denominator: pair.1,
            start_offset,
            payload: self.payload.clone(),
        }
    }

    /// Non-reducing sum
    ///
    /// Unanchored operands add at the least common multiple of their
    /// denominators. One anchored operand lends its offset to the sum. Two
    /// anchored operands merge into the convex hull of their timespans,
    /// expressed at this division's denominator when exact, else at the
    /// other's.
    pub fn add<Q>(&self, other: &Division<Q>) -> Result<Self> {
        match (self.timespan(), other.timespan()) {
            (Some(left), Some(right)) => {
                let hull = left.hull(&right);
                let pair = express(hull.duration(), self.denominator, other.denominator);
                Ok(self.rebuilt(pair, Some(hull.start)))
            }
            _ => {
                let pair = add_pairs(self.pair(), other.pair()).ok_or_else(|| {
                    PitchError::DivisionOverflow(format!("{} + {}", self, other))
                })?;
                Ok(self.rebuilt(pair, self.start_offset.or(other.start_offset)))
            }
        }
    }

    /// Non-reducing difference
    ///
    /// Both or neither operand must be anchored. Anchored operands subtract
    /// as timespans: a single remaining piece is returned anchored at its
    /// start; an empty remainder swaps the operands and negates; more than
    /// one piece is ambiguous. Disjoint timespans leave this division
    /// unchanged (see [`Division::is_disjoint_from`] to detect that case).
    pub fn subtract<Q>(&self, other: &Division<Q>) -> Result<Self> {
        let (left, right) = match (self.timespan(), other.timespan()) {
            (None, None) => {
                let (numerator, denominator) = other.pair();
                let pair = numerator
                    .checked_neg()
                    .and_then(|negated| add_pairs(self.pair(), (negated, denominator)))
                    .ok_or_else(|| PitchError::DivisionOverflow(format!("{} - {}", self, other)))?;
                return Ok(self.rebuilt(pair, None));
            }
            (Some(left), Some(right)) => (left, right),
            _ => {
                return Err(PitchError::MismatchedStartOffsets {
                    left: self.to_string(),
                    right: other.to_string(),
                })
            }
        };

        if !left.intersects(&right) {
            log::warn!(
                "subtracting disjoint division {} from {}; left operand returned unchanged",
                other,
                self
            );
            return Ok(self.clone());
        }

        let ambiguous = |pieces: usize| PitchError::AmbiguousSubtraction {
            left: self.to_string(),
            right: other.to_string(),
            pieces,
        };

        match left.difference(&right).as_slice() {
            [piece] => {
                let pair = express(piece.duration(), self.denominator, other.denominator);
                Ok(self.rebuilt(pair, Some(piece.start)))
            }
            [] => match right.difference(&left).as_slice() {
                [piece] => {
                    let (numerator, denominator) =
                        express(piece.duration(), self.denominator, other.denominator);
                    Ok(self.rebuilt((-numerator, denominator), Some(piece.start)))
                }
                [] => Ok(self.rebuilt((0, self.denominator), Some(left.start))),
                pieces => Err(ambiguous(pieces.len())),
            },
            pieces => Err(ambiguous(pieces.len())),
        }
    }
}

impl<P> fmt::Display for Division<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)?;
        if let Some(start) = self.start_offset {
            write!(f, "@{}", start)?;
        }
        Ok(())
    }
}

/// Sum two pairs at the least common multiple of their denominators
///
/// `None` when the sum does not fit in `i64`.
fn add_pairs(left: (i64, i64), right: (i64, i64)) -> Option<(i64, i64)> {
    if left.1 == right.1 {
        return Some((left.0.checked_add(right.0)?, left.1));
    }
    let denominator = (left.1 / left.1.gcd(&right.1)).checked_mul(right.1)?;
    let numerator = left
        .0
        .checked_mul(denominator / left.1)?
        .checked_add(right.0.checked_mul(denominator / right.1)?)?;
    Some((numerator, denominator))
}

/// `value` as a pair with `denominator`, when that is exact
fn pair_at(value: Rational64, denominator: i64) -> Option<(i64, i64)> {
    let scaled = value * Rational64::from_integer(denominator);
    scaled
        .is_integer()
        .then(|| (scaled.to_integer(), denominator))
}

/// Prefer the first denominator, then the second, then the reduced form
fn express(value: Rational64, preferred: i64, fallback: i64) -> (i64, i64) {
    pair_at(value, preferred)
        .or_else(|| pair_at(value, fallback))
        .unwrap_or((*value.numer(), *value.denom()))
}

/// Closed-open span `[start, stop)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Timespan {
    start: Rational64,
    stop: Rational64,
}

impl Timespan {
    fn new(a: Rational64, b: Rational64) -> Self {
        Self {
            start: a.min(b),
            stop: a.max(b),
        }
    }

    fn duration(&self) -> Rational64 {
        self.stop - self.start
    }

    fn intersects(&self, other: &Timespan) -> bool {
        self.start < other.stop && other.start < self.stop
    }

    fn hull(&self, other: &Timespan) -> Timespan {
        Timespan::new(self.start.min(other.start), self.stop.max(other.stop))
    }

    /// Pieces of `self` not covered by `other`
    fn difference(&self, other: &Timespan) -> Vec<Timespan> {
        if !self.intersects(other) {
            return vec![*self];
        }
        let mut pieces = Vec::new();
        if self.start < other.start {
            pieces.push(Timespan::new(self.start, other.start));
        }
        if other.stop < self.stop {
            pieces.push(Timespan::new(other.stop, self.stop));
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> Rational64 {
        Rational64::from_integer(n)
    }

    #[test]
    fn test_zero_denominator_is_rejected() {
        assert_eq!(Division::new((3, 0)), Err(PitchError::ZeroDenominator(3)));
    }

    #[test]
    fn test_negative_denominator_moves_sign() {
        assert_eq!(Division::new((3, -8)).unwrap().pair(), (-3, 8));
    }

    #[test]
    fn test_negating_minimum_denominator_is_an_overflow() {
        assert!(matches!(
            Division::new((1, i64::MIN)),
            Err(PitchError::DivisionOverflow(_))
        ));
        assert!(matches!(
            Division::new((i64::MIN, -1)),
            Err(PitchError::DivisionOverflow(_))
        ));
    }

    #[test]
    fn test_add_pairs_reports_overflow() {
        assert_eq!(add_pairs((1, 4), (1, 6)), Some((5, 12)));
        assert_eq!(add_pairs((i64::MAX / 2, 3), (1, 2)), None);
        assert_eq!(add_pairs((i64::MAX, 2), (1, 2)), None);
        assert_eq!(add_pairs((1, i64::MAX), (1, i64::MAX - 1)), None);
    }

    #[test]
    fn test_timespan_difference_pieces() {
        let whole = Timespan::new(r(0), r(10));
        assert_eq!(whole.difference(&Timespan::new(r(2), r(4))).len(), 2);
        assert_eq!(whole.difference(&Timespan::new(r(0), r(10))).len(), 0);
        assert_eq!(
            whole.difference(&Timespan::new(r(8), r(12))),
            vec![Timespan::new(r(0), r(8))]
        );
    }

    #[test]
    fn test_with_denominator() {
        let division = Division::new((1, 2)).unwrap();
        assert_eq!(division.with_denominator(8).pair(), (4, 8));
        assert_eq!(division.with_denominator(3).pair(), (1, 2));
    }
}
