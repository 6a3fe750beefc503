//! Zagged pitch-class maker
//!
//! Builds a three-level pitch-class tree from a handful of source cells:
//!
//! 1. the cells are helianthated (inner rotation left, outer rotation right)
//! 2. each resulting cell is split by the next division ratio, read cyclically
//! 3. the pieces are grouped by the grouping counts, read cyclically, with
//!    any short final group kept
//!
//! An optional spacing specifier registers the pieces before grouping, in
//! which case the tree's leaves are pitches.

use crate::errors::{PitchError, Result};
use crate::models::{Collection, CollectionList, PitchClass};
use crate::sequence::{self, Overhang};
use crate::spacing::Spacing;
use crate::tree::PitchTree;
use serde::{Deserialize, Serialize};

/// Ratio that leaves a cell whole
const WHOLE: &[usize] = &[1];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZaggedPitchClassMaker {
    pub pc_cells: Vec<Vec<PitchClass>>,
    pub division_ratios: Vec<Vec<usize>>,
    pub grouping_counts: Vec<usize>,
    pub spacing: Option<Spacing>,
}

impl Default for ZaggedPitchClassMaker {
    fn default() -> Self {
        Self {
            pc_cells: Vec::new(),
            division_ratios: vec![vec![1]],
            grouping_counts: vec![1],
            spacing: None,
        }
    }
}

impl ZaggedPitchClassMaker {
    pub fn new<P: Into<PitchClass>>(
        pc_cells: impl IntoIterator<Item = impl IntoIterator<Item = P>>,
    ) -> Self {
        Self {
            pc_cells: pc_cells
                .into_iter()
                .map(|cell| cell.into_iter().map(Into::into).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_division_ratios(mut self, division_ratios: Vec<Vec<usize>>) -> Self {
        self.division_ratios = division_ratios;
        self
    }

    pub fn with_grouping_counts(mut self, grouping_counts: Vec<usize>) -> Self {
        self.grouping_counts = grouping_counts;
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Helianthated cells split by ratio, one collection per non-empty piece
    pub fn pieces(&self) -> Result<CollectionList> {
        let cells = CollectionList::pitch_class_segments(self.pc_cells.iter().cloned())
            .helianthate(-1, 1)?;
        let mut pieces = Vec::new();
        for (index, cell) in cells.iter().enumerate() {
            let pitch_classes = cell.pitch_class_sequence();
            let ratio = match self.division_ratios.len() {
                0 => WHOLE,
                length => self.division_ratios[index % length].as_slice(),
            };
            if ratio.iter().all(|&weight| weight == 0) {
                return Err(PitchError::ZeroRatio(ratio.to_vec()));
            }
            pieces.extend(
                sequence::partition_by_ratio_of_lengths(&pitch_classes, ratio)
                    .into_iter()
                    .filter(|piece| !piece.is_empty())
                    .map(Collection::pitch_class_segment),
            );
        }
        Ok(CollectionList::new(pieces))
    }

    pub fn make(&self) -> Result<PitchTree> {
        let mut pieces = self.pieces()?;
        if let Some(spacing) = &self.spacing {
            pieces = spacing.apply(&pieces)?;
        }
        let groups: Vec<CollectionList> = sequence::partition_by_counts(
            pieces.as_slice(),
            &self.grouping_counts,
            true,
            Overhang::Keep,
        )?
        .into_iter()
        .map(CollectionList::new)
        .collect();
        log::debug!(
            "zagged maker: {} cells -> {} pieces in {} groups",
            self.pc_cells.len(),
            pieces.len(),
            groups.len()
        );
        PitchTree::from_groups(&groups)
    }
}
