//! Unary collection operators
//!
//! Operators are plain values that map one collection to another. A
//! `Compound` operator applies its members left to right, which is how
//! pipelines of transforms are expressed for `accumulate` and the design
//! maker.

use super::collection::Collection;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Transposition(f64),
    /// Inversion around an axis, or the first item when absent
    Inversion(Option<f64>),
    Multiplication(i32),
    Retrograde,
    Rotation(i64),
    Compound(Vec<Operator>),
}

impl Operator {
    pub fn apply(&self, collection: &Collection) -> Collection {
        match self {
            Operator::Transposition(n) => collection.transpose(*n),
            Operator::Inversion(axis) => collection.invert(*axis),
            Operator::Multiplication(n) => collection.multiply(*n),
            Operator::Retrograde => collection.retrograde(),
            Operator::Rotation(n) => collection.rotate(*n),
            Operator::Compound(operators) => operators
                .iter()
                .fold(collection.clone(), |current, operator| operator.apply(&current)),
        }
    }
}
