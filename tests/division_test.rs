// Division arithmetic: unreduced pairs, anchored timespans, opaque payloads

use num_rational::Rational64;
use pitch_engine::{Division, PitchError};

/// Helper for an integer offset
fn at(n: i64) -> Rational64 {
    Rational64::from_integer(n)
}

/// Helper to create an anchored division
fn anchored(pair: (i64, i64), start: i64) -> Division {
    Division::new(pair).unwrap().with_start_offset(at(start))
}

#[test]
fn test_pairs_are_never_reduced() {
    let three_sixths = Division::new((3, 6)).unwrap();
    let one_half = Division::new((1, 2)).unwrap();
    assert_ne!(three_sixths, one_half);
    assert_eq!(three_sixths.duration(), one_half.duration());
    assert_eq!(three_sixths.pair(), (3, 6));

    let sum = three_sixths.add(&Division::new((1, 6)).unwrap()).unwrap();
    assert_eq!(sum.pair(), (4, 6));
}

#[test]
fn test_unanchored_add_is_commutative() {
    let quarter = Division::new((1, 4)).unwrap();
    let sixth = Division::new((1, 6)).unwrap();
    assert_eq!(quarter.add(&sixth).unwrap(), sixth.add(&quarter).unwrap());
    assert_eq!(quarter.add(&sixth).unwrap().pair(), (5, 12));
}

#[test]
fn test_add_past_i64_is_an_error() {
    let huge = Division::new((i64::MAX / 2, 3)).unwrap();
    let half = Division::new((1, 2)).unwrap();
    assert!(matches!(huge.add(&half), Err(PitchError::DivisionOverflow(_))));
    assert!(matches!(
        Division::new((i64::MIN, -1)),
        Err(PitchError::DivisionOverflow(_))
    ));
    let lowest = Division::new((i64::MIN, 1)).unwrap();
    assert!(matches!(
        half.subtract(&lowest),
        Err(PitchError::DivisionOverflow(_))
    ));
}

#[test]
fn test_one_anchored_operand_lends_its_offset() {
    let anchored = anchored((1, 4), 2);
    let free = Division::new((1, 4)).unwrap();
    assert_eq!(free.add(&anchored).unwrap().start_offset(), Some(at(2)));
    assert_eq!(anchored.add(&free).unwrap().pair(), (2, 4));
}

#[test]
fn test_anchored_add_merges_timespans() {
    let merged = anchored((2, 1), 0).add(&anchored((2, 1), 1)).unwrap();
    assert_eq!(merged.start_offset(), Some(at(0)));
    assert_eq!(merged.duration(), at(3));
    assert_eq!(merged.pair(), (3, 1));
    assert_eq!(merged.to_string(), "3/1@0");
}

#[test]
fn test_anchored_add_prefers_left_denominator() {
    let left = Division::new((2, 4)).unwrap().with_start_offset(at(0));
    let right = Division::new((3, 8)).unwrap().with_start_offset(Rational64::new(1, 4));
    // [0, 1/2) and [1/4, 5/8) merge to 5/8, not exact in quarters
    assert_eq!(left.add(&right).unwrap().pair(), (5, 8));
    let right = Division::new((2, 8)).unwrap().with_start_offset(Rational64::new(1, 2));
    assert_eq!(left.add(&right).unwrap().pair(), (3, 4));
}

#[test]
fn test_subtract_unanchored() {
    let difference = Division::new((3, 4))
        .unwrap()
        .subtract(&Division::new((1, 8)).unwrap())
        .unwrap();
    assert_eq!(difference.pair(), (5, 8));
    assert_eq!(difference.start_offset(), None);
}

#[test]
fn test_subtract_leaves_tail_anchored_at_its_start() {
    let difference = anchored((4, 1), 10).subtract(&anchored((2, 1), 10)).unwrap();
    assert_eq!(difference.duration(), at(2));
    assert_eq!(difference.start_offset(), Some(at(12)));
}

#[test]
fn test_subtract_swallowed_left_swaps_and_negates() {
    let difference = anchored((2, 1), 10).subtract(&anchored((4, 1), 10)).unwrap();
    assert_eq!(difference.pair(), (-2, 1));
    assert_eq!(difference.start_offset(), Some(at(12)));
}

#[test]
fn test_subtract_equal_spans_is_zero() {
    let difference = anchored((2, 1), 3).subtract(&anchored((2, 1), 3)).unwrap();
    assert_eq!(difference.pair(), (0, 1));
    assert_eq!(difference.start_offset(), Some(at(3)));
}

#[test]
fn test_subtract_from_middle_is_ambiguous() {
    let result = anchored((10, 1), 0).subtract(&anchored((2, 1), 4));
    assert!(matches!(
        result,
        Err(PitchError::AmbiguousSubtraction { pieces: 2, .. })
    ));
}

#[test]
fn test_subtract_requires_matching_offsets() {
    let result = anchored((1, 1), 0).subtract(&Division::new((1, 1)).unwrap());
    assert_eq!(
        result.unwrap_err().to_string(),
        "mismatched start offsets: 1/1@0 and 1/1"
    );
}

#[test]
fn test_subtract_disjoint_returns_left_unchanged() {
    let left = anchored((1, 1), 0);
    let right = anchored((1, 1), 5);
    assert!(left.is_disjoint_from(&right));
    assert_eq!(left.subtract(&right).unwrap(), left);

    // touching spans do not overlap either
    assert!(left.is_disjoint_from(&anchored((1, 1), 1)));
    assert!(!left.is_disjoint_from(&Division::new((1, 1)).unwrap()));
}

#[test]
fn test_run_anchors_by_cumulative_duration() {
    let divisions = Division::run(&[(1, 4), (3, 8), (1, 2)], at(0)).unwrap();
    let starts: Vec<_> = divisions.iter().map(|d| d.start_offset().unwrap()).collect();
    assert_eq!(starts, vec![at(0), Rational64::new(1, 4), Rational64::new(5, 8)]);
    assert_eq!(divisions[2].stop_offset(), Some(Rational64::new(9, 8)));
    assert_eq!(divisions[1].to_string(), "3/8@1/4");
}

#[test]
fn test_payload_is_carried_through_arithmetic() {
    let tagged = Division::new((1, 4)).unwrap().with_payload("violin");
    let other = Division::new((1, 4)).unwrap().with_payload(17);
    let sum = tagged.add(&other).unwrap();
    assert_eq!(*sum.payload(), "violin");
    assert_eq!(sum.pair(), (2, 4));
}
