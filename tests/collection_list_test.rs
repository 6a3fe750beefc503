// CollectionList sequence algebra: helianthation, read, partition,
// accumulation and duplicate/repeat queries

use pitch_engine::{
    Collection, CollectionList, Operator, Overhang, Partition, Pattern, PitchError, Registration,
    RegistrationComponent,
};

/// Helper to build a list of pitch-class segments
fn segments(cells: &[&[i32]]) -> CollectionList {
    CollectionList::pitch_class_segments(cells.iter().map(|cell| cell.to_vec()))
}

/// Helper to read a list back as plain numbers
fn numbers(collections: &CollectionList) -> Vec<Vec<f64>> {
    collections.iter().map(Collection::numbers).collect()
}

#[test]
fn test_helianthate_expansion() {
    let cells = segments(&[&[1, 2, 3], &[4, 5], &[6, 7, 8]]);
    let result = cells.helianthate(-1, 1).unwrap();
    let expected = segments(&[
        &[1, 2, 3],
        &[4, 5],
        &[6, 7, 8],
        &[5, 4],
        &[8, 6, 7],
        &[3, 1, 2],
        &[7, 8, 6],
        &[2, 3, 1],
        &[4, 5],
        &[1, 2, 3],
        &[5, 4],
        &[6, 7, 8],
        &[4, 5],
        &[8, 6, 7],
        &[3, 1, 2],
        &[7, 8, 6],
        &[2, 3, 1],
        &[5, 4],
    ]);
    assert_eq!(result, expected);
    assert_eq!(result.len() % cells.len(), 0);
}

#[test]
fn test_helianthate_zero_step_is_input() {
    let cells = segments(&[&[1, 2, 3], &[4, 5]]);
    assert_eq!(cells.helianthate(0, 1).unwrap(), cells);
    assert_eq!(cells.helianthate(1, 0).unwrap(), cells);
    assert!(CollectionList::default().helianthate(1, 1).unwrap().is_empty());
}

#[test]
fn test_read_wraps_around_the_source() {
    let cells = segments(&[&[1, 2, 3], &[4, 5]]);
    let read = cells.read(&[2, 2, 2, 2, 2], true).unwrap();
    assert_eq!(
        numbers(&read),
        vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![5.0, 1.0],
            vec![2.0, 3.0],
            vec![4.0, 5.0]
        ]
    );
    assert_eq!(cells.read(&[4, 4], false).unwrap()[1].numbers(), vec![5.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_inexact_read_is_named() {
    let cells = segments(&[&[1, 2, 3], &[4, 5]]);
    let err = cells.read(&[3, 3], true).unwrap_err();
    assert_eq!(err.to_string(), "call reads 6 items; not a multiple of 5 items");
}

#[test]
fn test_partition_cyclic_with_overhang() {
    let cells = segments(&[&[0], &[1], &[2], &[3], &[4]]);
    let groups = cells
        .partition(&[2], true, false, Overhang::Keep)
        .unwrap()
        .into_groups();
    let lengths: Vec<usize> = groups.iter().map(CollectionList::len).collect();
    assert_eq!(lengths, vec![2, 2, 1]);

    let dropped = cells.partition(&[2], true, false, Overhang::Drop).unwrap();
    assert_eq!(dropped.into_groups().len(), 2);

    assert!(matches!(
        cells.partition(&[2], true, false, Overhang::Exact),
        Err(PitchError::InexactPartition { length: 5, .. })
    ));
}

#[test]
fn test_partition_joined() {
    let cells = segments(&[&[0], &[1], &[2], &[3], &[4]]);
    let Partition::Joined(joined) = cells.partition(&[3, 2], false, true, Overhang::Drop).unwrap()
    else {
        panic!("expected joined partition");
    };
    assert_eq!(joined.to_string(), "[<0, 1, 2>, <3, 4>]");
}

#[test]
fn test_accumulate_until_identity() {
    let cells = segments(&[&[0, 1, 2, 3], &[6, 7]]);
    let result = cells.accumulate(&[Operator::Transposition(3.0)], None).unwrap();
    assert_eq!(result.len(), 8);
    assert_eq!(result[2].numbers(), vec![3.0, 4.0, 5.0, 6.0]);
    assert_eq!(result[7].numbers(), vec![3.0, 4.0]);
}

#[test]
fn test_accumulate_with_count() {
    let cells = segments(&[&[0, 1]]);
    let operators = [Operator::Transposition(1.0), Operator::Retrograde];
    let result = cells.accumulate(&operators, Some(4)).unwrap();
    assert_eq!(
        numbers(&result),
        vec![vec![0.0, 1.0], vec![1.0, 2.0], vec![2.0, 1.0], vec![3.0, 2.0]]
    );
}

#[test]
fn test_accumulate_on_pitches_hits_bound() {
    let pitches = CollectionList::pitch_segments([[0, 1]]);
    assert_eq!(
        pitches.accumulate(&[Operator::Transposition(1.0)], None),
        Err(PitchError::IterationBoundExceeded {
            operation: "accumulate",
            bound: 999
        })
    );
}

#[test]
fn test_duplicates_and_repeats_by_level() {
    let repeated = segments(&[&[1, 2], &[1, 2], &[3, 3]]);
    for level in [0, 1, -1] {
        assert!(repeated.has_duplicates(level).unwrap());
        assert!(repeated.has_repeats(level).unwrap());
    }

    let scattered = segments(&[&[1, 2], &[3, 1]]);
    assert!(!scattered.has_duplicates(0).unwrap());
    assert!(!scattered.has_duplicates(1).unwrap());
    assert!(scattered.has_duplicates(-1).unwrap());
    assert!(!scattered.has_repeats(-1).unwrap());
}

#[test]
fn test_remove_duplicates_by_level() {
    let cells = segments(&[&[1, 2], &[1, 2], &[3, 3]]);
    assert_eq!(cells.remove_duplicates(0).unwrap().len(), 2);
    assert_eq!(cells.remove_duplicates(1).unwrap()[2].numbers(), vec![3.0]);
    assert_eq!(cells.remove_repeats(0).unwrap().to_string(), "[<1, 2>, <3, 3>]");
}

#[test]
fn test_retain_and_remove_by_pattern() {
    let cells = segments(&[&[0], &[1], &[2], &[3], &[4]]);
    let every_other = Pattern::cyclic(2, [0]);
    assert_eq!(cells.retain(&every_other).to_string(), "[<0>, <2>, <4>]");
    assert_eq!(cells.remove(&every_other).to_string(), "[<1>, <3>]");
    assert_eq!(cells.retain(&Pattern::indices([-1])).to_string(), "[<4>]");
}

#[test]
fn test_octave_moves_follow_pattern() {
    let cells = CollectionList::pitch_segments([vec![0, 4, 7], vec![0, 4, 7]]);
    let moved = cells.bass_to_octave(5, &Pattern::indices([1]));
    assert_eq!(moved[0].numbers(), vec![0.0, 4.0, 7.0]);
    assert_eq!(moved[1].numbers(), vec![12.0, 16.0, 19.0]);
}

#[test]
fn test_transpose_zero_is_identity() {
    let cells = segments(&[&[0, 1, 2], &[11]]);
    assert_eq!(cells.transpose(0.0), cells);
    assert_eq!(cells.rotate(0), cells);
}

#[test]
fn test_cursor_over_list() {
    let cells = segments(&[&[0], &[1]]);
    let mut cursor = cells.cursor(false);
    assert_eq!(cursor.advance(2).unwrap().len(), 2);
    assert!(matches!(
        cursor.advance(1),
        Err(PitchError::CursorExhausted { position: 2, length: 2 })
    ));
}

#[test]
fn test_register_through_pitch_ranges() {
    let registration = Registration::new(vec![
        RegistrationComponent::new("[-39, 0)".parse().unwrap(), -12),
        RegistrationComponent::new("[0, 48)".parse().unwrap(), 12),
    ]);
    let cells = CollectionList::pitch_segments([vec![-5, 3]]);
    let registered = cells.register(&registration).unwrap();
    assert_eq!(registered[0].numbers(), vec![-5.0, 15.0]);

    let out_of_range = CollectionList::pitch_segments([vec![60]]);
    assert!(matches!(
        out_of_range.register(&registration),
        Err(PitchError::NoRegistrationComponent(_))
    ));
}
