//! Generative makers that drive the collection algebra
//!
//! - `Cursor`: reads collections from a list, optionally wrapping
//! - `ZaggedPitchClassMaker`: helianthation, ratio division and grouping
//!   into a three-level pitch-class tree
//! - `DesignMaker`: cells cut from cursor reads into a two-level tree

pub mod cursor;
pub mod design;
pub mod zagged;

pub use cursor::Cursor;
pub use design::DesignMaker;
pub use zagged::ZaggedPitchClassMaker;
