//! Design maker: cells cut from a cursor's material
//!
//! Each partition step reads collections from a cursor, flattens them into
//! one segment, runs the operators over it in order and cuts the result by
//! counts. The cells accumulate across steps; `make` returns them as a
//! two-level pitch tree.

use super::cursor::Cursor;
use crate::errors::Result;
use crate::models::{Collection, CollectionList, ItemKind, Operator, Order};
use crate::sequence::{self, Overhang};
use crate::tree::PitchTree;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DesignMaker {
    cells: Vec<Collection>,
}

impl DesignMaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Collection] {
        &self.cells
    }

    /// Read `number` collections one at a time and cut each by `counts`,
    /// read once; items past the counts form a final shorter cell
    pub fn partition(
        &mut self,
        cursor: &mut Cursor,
        number: usize,
        counts: &[usize],
        operators: &[Operator],
    ) -> Result<()> {
        self.cut(cursor, number, counts, operators, false)
    }

    /// As `partition`, with `counts` repeating until each read is used up
    pub fn partition_cyclic(
        &mut self,
        cursor: &mut Cursor,
        number: usize,
        counts: &[usize],
        operators: &[Operator],
    ) -> Result<()> {
        self.cut(cursor, number, counts, operators, true)
    }

    fn cut(
        &mut self,
        cursor: &mut Cursor,
        number: usize,
        counts: &[usize],
        operators: &[Operator],
        cyclic: bool,
    ) -> Result<()> {
        for _ in 0..number {
            let read = CollectionList::new(cursor.advance(1)?);
            let kind = read
                .get(0)
                .map(Collection::kind)
                .unwrap_or(ItemKind::PitchClass);
            let segment = Collection::from_items(Order::Segment, kind, &read.flatten())?;
            let segment = operators
                .iter()
                .fold(segment, |current, operator| operator.apply(&current));
            let items = segment.to_items();
            for cell in sequence::partition_by_counts(&items, counts, cyclic, Overhang::Keep)? {
                self.cells.push(Collection::from_items(Order::Segment, kind, &cell)?);
            }
        }
        log::debug!("design maker holds {} cells", self.cells.len());
        Ok(())
    }

    pub fn make(&self) -> Result<PitchTree> {
        PitchTree::from_collections(&CollectionList::new(self.cells.clone()))
    }
}
