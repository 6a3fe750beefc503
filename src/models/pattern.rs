//! Index-selection patterns
//!
//! A pattern decides, from an index and the total length of a sequence,
//! whether that position is selected. Spacing and retain/remove on
//! collection lists use it to pick which collections they touch.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Every index
    #[default]
    All,
    /// Explicit indices; negative values count back from the end
    Indices(Vec<i64>),
    /// Indices whose position modulo `period` is one of `offsets`
    Cyclic { period: usize, offsets: Vec<i64> },
}

impl Pattern {
    pub fn indices(indices: impl IntoIterator<Item = i64>) -> Self {
        Pattern::Indices(indices.into_iter().collect())
    }

    pub fn cyclic(period: usize, offsets: impl IntoIterator<Item = i64>) -> Self {
        Pattern::Cyclic {
            period,
            offsets: offsets.into_iter().collect(),
        }
    }

    /// True when `index` is selected in a sequence of `length` items
    pub fn matches_index(&self, index: usize, length: usize) -> bool {
        if index >= length {
            return false;
        }
        match self {
            Pattern::All => true,
            Pattern::Indices(indices) => indices
                .iter()
                .any(|&candidate| normalize(candidate, length as i64) == Some(index as i64)),
            Pattern::Cyclic { period, offsets } => {
                if *period == 0 {
                    return false;
                }
                let period = *period as i64;
                let position = index as i64 % period;
                offsets
                    .iter()
                    .any(|&offset| offset.rem_euclid(period) == position)
            }
        }
    }
}

fn normalize(index: i64, length: i64) -> Option<i64> {
    let index = if index < 0 { length + index } else { index };
    (0..length).contains(&index).then_some(index)
}
