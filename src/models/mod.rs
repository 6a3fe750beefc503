//! Value types of the pitch engine
//!
//! Pitches and pitch-classes, the collections built from them, lists of
//! collections and the operators, patterns and registrations that act on
//! them, plus exact rational divisions.

pub mod collection;
pub mod collection_list;
pub mod division;
pub mod operator;
pub mod pattern;
pub mod pitch;
pub mod registration;

// Re-export commonly used types
pub use collection::{Collection, Items, Order};
pub use collection_list::{CollectionList, Partition};
pub use division::Division;
pub use operator::Operator;
pub use pattern::Pattern;
pub use pitch::{Item, ItemKind, Pitch, PitchClass};
pub use registration::{PitchRange, Registration, RegistrationComponent};
