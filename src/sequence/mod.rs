//! Sequence algebra shared by collections, collection lists and pitch trees
//!
//! Rotation, count- and ratio-driven partitioning, and helianthation. All
//! functions are pure and work on slices of any cloneable element.

use crate::errors::{PitchError, Result};
use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rotate right by `n` (left when negative)
pub fn rotate<T: Clone>(items: &[T], n: i64) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let length = items.len() as i64;
    let split = (length - n.rem_euclid(length)) as usize;
    items[split..].iter().chain(items[..split].iter()).cloned().collect()
}

/// What to do with items left over once the counts run out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overhang {
    /// Discard a trailing part shorter than its count
    #[default]
    Drop,
    /// Keep the trailing remainder as a final, shorter part
    Keep,
    /// Fail unless the counts consume every item
    Exact,
}

/// Split `items` into consecutive parts of the given sizes
///
/// Zero counts produce no part. When `cyclic` is false the counts are read
/// once; when true they repeat until the items run out.
pub fn partition_by_counts<T: Clone>(
    items: &[T],
    counts: &[usize],
    cyclic: bool,
    overhang: Overhang,
) -> Result<Vec<Vec<T>>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut short_tail = false;

    if counts.iter().any(|&count| count > 0) {
        let mut index = 0;
        while start < items.len() {
            if !cyclic && index == counts.len() {
                break;
            }
            let count = counts[index % counts.len()];
            index += 1;
            if count == 0 {
                continue;
            }
            let stop = start + count;
            if stop > items.len() {
                short_tail = true;
                break;
            }
            parts.push(items[start..stop].to_vec());
            start = stop;
        }
    }

    let remainder = &items[start..];
    match overhang {
        Overhang::Drop => {}
        Overhang::Keep => {
            if !remainder.is_empty() {
                parts.push(remainder.to_vec());
            }
        }
        Overhang::Exact => {
            if !remainder.is_empty() || short_tail {
                return Err(PitchError::InexactPartition {
                    counts: counts.to_vec(),
                    length: items.len(),
                });
            }
        }
    }
    Ok(parts)
}

/// Split the integer `n` into parts proportional to `ratio`
///
/// Cumulative shares are exact fractions rounded half-to-even, so parts
/// always sum to `n`.
pub fn partition_integer_by_ratio(n: usize, ratio: &[usize]) -> Vec<usize> {
    let total: usize = ratio.iter().sum();
    if total == 0 {
        return vec![0; ratio.len()];
    }
    let mut parts = Vec::with_capacity(ratio.len());
    let mut cumulative = 0;
    let mut assigned = 0;
    for &weight in ratio {
        cumulative += weight;
        let share = Rational64::new((n * cumulative) as i64, total as i64);
        let rounded = round_half_even(share) as usize;
        parts.push(rounded.saturating_sub(assigned));
        assigned = assigned.max(rounded);
    }
    parts
}

/// Round a non-negative fraction to the nearest integer, ties to even
fn round_half_even(value: Rational64) -> i64 {
    let floor = value.floor().to_integer();
    match (value - value.floor()).cmp(&Rational64::new(1, 2)) {
        Ordering::Less => floor,
        Ordering::Greater => floor + 1,
        Ordering::Equal => floor + floor.rem_euclid(2),
    }
}

/// Split `items` into consecutive parts whose lengths follow `ratio`
pub fn partition_by_ratio_of_lengths<T: Clone>(items: &[T], ratio: &[usize]) -> Vec<Vec<T>> {
    let mut parts = Vec::with_capacity(ratio.len());
    let mut start = 0;
    for length in partition_integer_by_ratio(items.len(), ratio) {
        let stop = (start + length).min(items.len());
        parts.push(items[start..stop].to_vec());
        start = stop;
    }
    parts
}

/// Something whose contents can be rotated, as the inner step of helianthation
pub trait Rotate: Sized {
    fn rotate(&self, n: i64) -> Self;

    /// Smallest positive rotation that is guaranteed to be the identity
    fn rotation_period(&self) -> usize;
}

impl<T: Clone> Rotate for Vec<T> {
    fn rotate(&self, n: i64) -> Self {
        rotate(self, n)
    }

    fn rotation_period(&self) -> usize {
        self.len().max(1)
    }
}

/// Helianthate `items`: rotate each element by multiples of `m` and the
/// sequence by multiples of `n`, appending every configuration until the
/// starting one recurs.
///
/// The output begins with `items` itself and its length is a multiple of
/// `items.len()`. A zero step on either axis returns `items` unchanged.
pub fn helianthate<T>(items: &[T], n: i64, m: i64) -> Result<Vec<T>>
where
    T: Rotate + Clone + PartialEq,
{
    let mut result = items.to_vec();
    if n == 0 || m == 0 || items.is_empty() {
        return Ok(result);
    }

    let bound = items
        .iter()
        .map(Rotate::rotation_period)
        .fold(items.len(), num_integer::lcm);

    let (mut outer, mut inner) = (n, m);
    for _ in 0..bound {
        let rotated: Vec<T> = items.iter().map(|item| item.rotate(inner)).collect();
        let candidate = rotate(&rotated, outer);
        if candidate.as_slice() == items {
            log::debug!(
                "helianthate(n={}, m={}): {} items -> {}",
                n,
                m,
                items.len(),
                result.len()
            );
            return Ok(result);
        }
        result.extend(candidate);
        outer += n;
        inner += m;
    }

    Err(PitchError::IterationBoundExceeded {
        operation: "helianthate",
        bound,
    })
}
