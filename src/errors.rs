//! Error types for the pitch engine
//!
//! Every fallible operation in the crate reports one of these. Construction
//! and usage errors describe the offending value; the two bound errors
//! indicate a broken internal invariant rather than ordinary misuse.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, PitchError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PitchError {
    /// Pitches and pitch-classes were mixed in one collection or tree
    #[error("mixed item kinds: expected {expected}, found {found}")]
    MixedItemKinds {
        expected: &'static str,
        found: &'static str,
    },

    /// An operation needed one item kind and received the other
    #[error("wrong item kind: expected {expected}, found {found} {item}")]
    WrongItemKind {
        expected: &'static str,
        found: &'static str,
        item: String,
    },

    /// Internal tree nodes must own at least one child
    #[error("pitch tree group at level {0} has no children")]
    EmptyGroup(usize),

    /// Division constructed with a zero denominator
    #[error("division denominator must be nonzero: ({0}, 0)")]
    ZeroDenominator(i64),

    /// Division arithmetic that does not fit in `i64`
    #[error("division arithmetic overflows i64: {0}")]
    DivisionOverflow(String),

    /// Declared bass or soprano is not a member of the spaced collection
    #[error("{role} {pitch_class} not in collection {collection}")]
    NotInCollection {
        role: &'static str,
        pitch_class: String,
        collection: String,
    },

    /// Subtraction between an anchored and an unanchored division
    #[error("mismatched start offsets: {left} and {right}")]
    MismatchedStartOffsets { left: String, right: String },

    /// Timespan subtraction left more than one piece
    #[error("ambiguous subtraction: {left} minus {right} leaves {pieces} pieces")]
    AmbiguousSubtraction {
        left: String,
        right: String,
        pieces: usize,
    },

    /// Division ratio whose weights sum to zero, which would drop its cell
    #[error("division ratio {0:?} has no nonzero weight")]
    ZeroRatio(Vec<usize>),

    /// Duplicate and repeat queries accept levels 0, 1 and -1 only
    #[error("level must be 0, 1 or -1: {0}")]
    InvalidLevel(i32),

    /// Exact read whose total length is not a multiple of the source length
    #[error("call reads {read} items; not a multiple of {length} items")]
    InexactRead { read: usize, length: usize },

    /// Exact partition whose counts do not consume the list
    #[error("partition counts {counts:?} do not exactly cover {length} collections")]
    InexactPartition { counts: Vec<usize>, length: usize },

    /// Chordal spacing scan exceeded its step bound
    #[error("chordal spacing scan exceeded {bound} steps with {remaining:?} unplaced")]
    ScanBoundExceeded { bound: usize, remaining: Vec<String> },

    /// Iterative expansion never returned to its starting configuration
    #[error("{operation} did not return to identity within {bound} passes")]
    IterationBoundExceeded {
        operation: &'static str,
        bound: usize,
    },

    /// Registration has no component whose source range contains the pitch
    #[error("no registration component contains pitch {0}")]
    NoRegistrationComponent(String),

    /// Non-cyclic cursor read past its source
    #[error("cursor exhausted at position {position} of {length}")]
    CursorExhausted { position: usize, length: usize },

    /// Malformed pitch range notation
    #[error("invalid pitch range: {0}")]
    InvalidPitchRange(String),
}
