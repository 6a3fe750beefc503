//! Pitch Engine WASM API
//!
//! The JavaScript-facing surface of the engine. Arguments arrive as plain JS
//! objects and are deserialized with `serde-wasm-bindgen`; engine errors come
//! back as string `JsValue`s.
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, (de)serialization and error conversion
//! - `collections`: helianthation and spacing of collection lists
//! - `trees`: zagged maker and pitch tree level runs

pub mod helpers;
pub mod collections;
pub mod trees;

pub use collections::{helianthate, space_collections};
pub use trees::{make_zagged_pitch_classes, pitch_tree_level_runs};
