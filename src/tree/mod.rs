//! PitchTree: recursive grouping of pitch or pitch-class leaves
//!
//! A node is either a leaf holding one item or a group holding one or more
//! children; nothing is both. The root may itself be a leaf. All leaves of a
//! tree share one item kind, which is checked when the tree is built.
//!
//! # Levels
//!
//! The root is at level 0 and every step down adds one. Counting the other
//! way, a node's negative level is minus the height of its subtree, so every
//! leaf is at -1 and the parent of leaves-only children is at -2. Renderers
//! use the negative level to decide where grouping brackets go.

use crate::errors::{PitchError, Result};
use crate::models::{Collection, CollectionList, Item, ItemKind, Order};
use crate::sequence;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Leaf(Item),
    Group(Vec<Node>),
}

impl Node {
    pub fn leaf(item: impl Into<Item>) -> Self {
        Node::Leaf(item.into())
    }

    pub fn group(children: Vec<Node>) -> Self {
        Node::Group(children)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Group(children) => children,
        }
    }

    /// Height of this subtree; a leaf has height 1
    pub fn height(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Group(children) => 1 + children.iter().map(Node::height).max().unwrap_or(0),
        }
    }

    /// Negative level: -1 for leaves, minus the subtree height otherwise
    pub fn negative_level(&self) -> isize {
        -(self.height() as isize)
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Group(children) => children.iter().map(Node::leaf_count).sum(),
        }
    }

    fn collect_leaves(&self, leaves: &mut Vec<Item>) {
        match self {
            Node::Leaf(item) => leaves.push(*item),
            Node::Group(children) => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }

    pub fn leaves(&self) -> Vec<Item> {
        let mut leaves = Vec::with_capacity(self.leaf_count());
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn map_leaves<F: Fn(&Item) -> Item + Copy>(&self, f: F) -> Node {
        match self {
            Node::Leaf(item) => Node::Leaf(f(item)),
            Node::Group(children) => {
                Node::Group(children.iter().map(|child| child.map_leaves(f)).collect())
            }
        }
    }

    /// Check shape and record the leaf kind, which must be shared
    fn validate(&self, level: usize, kind: &mut Option<ItemKind>) -> Result<()> {
        match self {
            Node::Leaf(item) => match kind {
                Some(expected) if *expected != item.kind() => Err(PitchError::MixedItemKinds {
                    expected: expected.name(),
                    found: item.kind().name(),
                }),
                _ => {
                    *kind = Some(item.kind());
                    Ok(())
                }
            },
            Node::Group(children) if children.is_empty() => Err(PitchError::EmptyGroup(level)),
            Node::Group(children) => children
                .iter()
                .try_for_each(|child| child.validate(level + 1, kind)),
        }
    }

    fn collect_runs(&self, level: usize, leaves: &mut usize, runs: &mut Vec<(usize, usize, usize)>) {
        match self {
            Node::Leaf(_) => *leaves += 1,
            Node::Group(children) => {
                let start = *leaves;
                let slot = runs.len();
                runs.push((level, start, start));
                for child in children {
                    child.collect_runs(level + 1, leaves, runs);
                }
                runs[slot].2 = *leaves;
            }
        }
    }

    fn collect_at_level<'a>(&'a self, depth: usize, level: isize, nodes: &mut Vec<&'a Node>) {
        let matches = if level >= 0 {
            depth as isize == level
        } else {
            self.negative_level() == level
        };
        if matches {
            nodes.push(self);
        }
        for child in self.children() {
            child.collect_at_level(depth + 1, level, nodes);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(item) => write!(f, "{}", item),
            Node::Group(children) => {
                write!(f, "[")?;
                for (index, child) in children.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// One grouping bracket for the renderer: the contiguous leaves a group
/// covers, tagged with the group's nesting level
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelRun {
    pub level: usize,
    pub leaves: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PitchTree {
    root: Node,
    kind: ItemKind,
}

impl PitchTree {
    /// Build a tree, rejecting empty groups and mixed leaf kinds
    ///
    /// A tree with no leaves at all is a single empty root group, which is
    /// rejected as an empty group.
    pub fn new(root: Node) -> Result<Self> {
        let mut kind = None;
        root.validate(0, &mut kind)?;
        let kind = kind.ok_or(PitchError::EmptyGroup(0))?;
        Ok(Self { root, kind })
    }

    /// Two-level tree: one group per collection, one leaf per item
    pub fn from_collections(collections: &CollectionList) -> Result<Self> {
        let groups = collections
            .iter()
            .map(|collection| {
                Node::Group(collection.to_items().into_iter().map(Node::Leaf).collect())
            })
            .collect();
        Self::new(Node::Group(groups))
    }

    /// Tree from nested groups of collection lists, as the generative makers
    /// produce them: one group per list, one subgroup per collection
    pub fn from_groups(groups: &[CollectionList]) -> Result<Self> {
        let nodes = groups
            .iter()
            .map(|group| {
                Node::Group(
                    group
                        .iter()
                        .map(|collection| {
                            Node::Group(
                                collection.to_items().into_iter().map(Node::Leaf).collect(),
                            )
                        })
                        .collect(),
                )
            })
            .collect();
        Self::new(Node::Group(nodes))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Number of top-level children (1 for a leaf root)
    pub fn len(&self) -> usize {
        match &self.root {
            Node::Leaf(_) => 1,
            Node::Group(children) => children.len(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Leaf payloads in depth-first order
    pub fn leaves(&self) -> Vec<Item> {
        self.root.leaves()
    }

    /// Nodes at `level`; negative levels count up from the leaves
    pub fn nodes_at_level(&self, level: isize) -> Vec<&Node> {
        let mut nodes = Vec::new();
        self.root.collect_at_level(0, level, &mut nodes);
        nodes
    }

    /// Leaves, or the top-level children's leaves grouped one list each
    pub fn get_payload(&self, nested: bool) -> Vec<Vec<Item>> {
        if !nested {
            return vec![self.leaves()];
        }
        match &self.root {
            Node::Leaf(item) => vec![vec![*item]],
            Node::Group(children) => children.iter().map(Node::leaves).collect(),
        }
    }

    /// One segment per top-level child
    pub fn to_collection_list(&self) -> Result<CollectionList> {
        self.get_payload(true)
            .iter()
            .map(|items| Collection::from_items(Order::Segment, self.kind, items))
            .collect::<Result<Vec<_>>>()
            .map(CollectionList::new)
    }

    fn with_root(&self, root: Node) -> Self {
        Self {
            root,
            kind: self.kind,
        }
    }

    pub fn transpose(&self, semitones: f64) -> Self {
        self.with_root(self.root.map_leaves(|item| item.transpose(semitones)))
    }

    /// Invert every leaf around `axis`, or around the first leaf when absent
    pub fn invert(&self, axis: Option<f64>) -> Self {
        let Some(axis) = axis.or_else(|| self.leaves().first().map(Item::number)) else {
            return self.clone();
        };
        self.with_root(self.root.map_leaves(|item| item.invert(axis)))
    }

    /// Reverse the top-level children; deeper groups keep their order
    pub fn retrograde(&self) -> Self {
        match &self.root {
            Node::Leaf(_) => self.clone(),
            Node::Group(children) => {
                self.with_root(Node::Group(children.iter().rev().cloned().collect()))
            }
        }
    }

    /// Rotate the top-level children right by `n`
    pub fn rotate(&self, n: i64) -> Self {
        match &self.root {
            Node::Leaf(_) => self.clone(),
            Node::Group(children) => self.with_root(Node::Group(sequence::rotate(children, n))),
        }
    }

    /// True when two leaves adjacent in cyclic depth-first order are equal
    pub fn has_repeats(&self) -> bool {
        let leaves = self.leaves();
        if leaves.len() < 2 {
            return false;
        }
        leaves
            .iter()
            .zip(leaves.iter().cycle().skip(1))
            .any(|(left, right)| left == right)
    }

    /// Per group, in depth-first order, the leaves it covers and its level
    pub fn level_runs(&self) -> Vec<LevelRun> {
        let mut runs = Vec::new();
        let mut leaf_index = 0;
        self.root.collect_runs(0, &mut leaf_index, &mut runs);
        let leaves = self.leaves();
        runs.into_iter()
            .map(|(level, start, stop)| LevelRun {
                level,
                leaves: leaves[start..stop].to_vec(),
            })
            .collect()
    }
}

impl fmt::Display for PitchTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pitch, PitchClass};

    fn pc(n: i32) -> Node {
        Node::leaf(PitchClass::from(n))
    }

    #[test]
    fn test_mixed_leaves_are_rejected() {
        let root = Node::group(vec![pc(1), Node::leaf(Pitch::from(2))]);
        assert_eq!(
            PitchTree::new(root),
            Err(PitchError::MixedItemKinds {
                expected: "pitch-class",
                found: "pitch"
            })
        );
    }

    #[test]
    fn test_empty_groups_are_rejected() {
        let root = Node::group(vec![pc(1), Node::group(vec![])]);
        assert_eq!(PitchTree::new(root), Err(PitchError::EmptyGroup(1)));
        assert_eq!(PitchTree::new(Node::group(vec![])), Err(PitchError::EmptyGroup(0)));
    }

    #[test]
    fn test_leaf_root() {
        let tree = PitchTree::new(pc(5)).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.rotate(3), tree);
        assert_eq!(tree.retrograde(), tree);
        assert!(!tree.has_repeats());
        assert!(tree.level_runs().is_empty());
    }

    #[test]
    fn test_negative_levels() {
        let root = Node::group(vec![Node::group(vec![pc(1), pc(2)]), pc(3)]);
        assert_eq!(root.negative_level(), -3);
        assert_eq!(root.children()[0].negative_level(), -2);
        assert_eq!(root.children()[1].negative_level(), -1);

        let tree = PitchTree::new(root).unwrap();
        assert_eq!(tree.nodes_at_level(-1).len(), 3);
        assert_eq!(tree.nodes_at_level(-2).len(), 1);
        assert_eq!(tree.nodes_at_level(1).len(), 2);
    }

    #[test]
    fn test_display() {
        let root = Node::group(vec![Node::group(vec![pc(1), pc(2)]), pc(3)]);
        assert_eq!(PitchTree::new(root).unwrap().to_string(), "[[1, 2], 3]");
    }
}
