// PitchTree construction, whole-tree transforms and renderer level runs

use pitch_engine::{CollectionList, Item, Node, PitchClass, PitchError, PitchTree};

/// Helper to build a two-level pitch-class tree
fn tree(cells: &[&[i32]]) -> PitchTree {
    let collections = CollectionList::pitch_class_segments(cells.iter().map(|cell| cell.to_vec()));
    PitchTree::from_collections(&collections).unwrap()
}

/// Helper to read leaves back as plain numbers
fn leaf_numbers(tree: &PitchTree) -> Vec<f64> {
    tree.leaves().iter().map(Item::number).collect()
}

#[test]
fn test_has_repeats_across_group_boundary() {
    let repeating = tree(&[&[4, 6, 10], &[9, 7, 8, 11, 9, 1], &[1, 2, 3, 5]]);
    assert!(repeating.has_repeats());

    let distinct_neighbours = tree(&[&[4, 6, 10], &[9, 7, 8, 11, 9, 1], &[0, 2, 3, 5]]);
    assert!(!distinct_neighbours.has_repeats());
}

#[test]
fn test_has_repeats_wraps_around() {
    assert!(tree(&[&[4, 6], &[10, 4]]).has_repeats());
}

#[test]
fn test_transpose_keeps_shape() {
    let original = tree(&[&[0, 1], &[2]]);
    let transposed = original.transpose(3.0);
    assert_eq!(leaf_numbers(&transposed), vec![3.0, 4.0, 5.0]);
    assert_eq!(transposed.to_string(), "[[3, 4], [5]]");
    assert_eq!(original.transpose(0.0), original);
}

#[test]
fn test_invert_defaults_to_first_leaf() {
    let inverted = tree(&[&[2, 3], &[5]]).invert(None);
    assert_eq!(leaf_numbers(&inverted), vec![2.0, 1.0, 11.0]);
    let around_zero = tree(&[&[2, 3], &[5]]).invert(Some(0.0));
    assert_eq!(leaf_numbers(&around_zero), vec![10.0, 9.0, 7.0]);
}

#[test]
fn test_retrograde_is_shallow() {
    let reversed = tree(&[&[0, 1], &[2, 3]]).retrograde();
    assert_eq!(reversed.to_string(), "[[2, 3], [0, 1]]");
}

#[test]
fn test_rotate_top_level() {
    let original = tree(&[&[0], &[1], &[2]]);
    assert_eq!(original.rotate(1).to_string(), "[[2], [0], [1]]");
    assert_eq!(original.rotate(0), original);
}

#[test]
fn test_level_runs_in_depth_first_order() {
    let runs = tree(&[&[1, 2], &[3]]).level_runs();
    let summary: Vec<(usize, Vec<f64>)> = runs
        .iter()
        .map(|run| (run.level, run.leaves.iter().map(Item::number).collect()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, vec![1.0, 2.0, 3.0]),
            (1, vec![1.0, 2.0]),
            (1, vec![3.0]),
        ]
    );
}

#[test]
fn test_payload_and_round_trip_to_collections() {
    let original = tree(&[&[1, 2], &[3]]);
    assert_eq!(original.leaf_count(), 3);
    assert_eq!(original.len(), 2);
    assert_eq!(original.get_payload(true).len(), 2);
    assert_eq!(original.get_payload(false)[0].len(), 3);

    let collections = original.to_collection_list().unwrap();
    assert_eq!(collections.to_string(), "[<1, 2>, <3>]");
}

#[test]
fn test_deeper_tree_levels() {
    let pc = |n: i32| Node::leaf(PitchClass::from(n));
    let root = Node::group(vec![
        Node::group(vec![Node::group(vec![pc(0), pc(1)]), pc(2)]),
        pc(3),
    ]);
    let tree = PitchTree::new(root).unwrap();
    assert_eq!(tree.nodes_at_level(2).len(), 2);
    assert_eq!(tree.nodes_at_level(-1).len(), 4);
    assert_eq!(tree.nodes_at_level(-2).len(), 1);
    assert_eq!(tree.nodes_at_level(-3).len(), 1);
    assert_eq!(tree.root().negative_level(), -4);
    assert_eq!(tree.level_runs().len(), 3);
}

#[test]
fn test_empty_collection_cannot_form_a_group() {
    let collections = CollectionList::pitch_class_segments([vec![1], vec![]]);
    assert_eq!(
        PitchTree::from_collections(&collections),
        Err(PitchError::EmptyGroup(1))
    );
}
