//! Pitch Engine WASM Module
//!
//! Pitch collection algebra for computer-aided composition: pitches and
//! pitch-classes, segments and sets, lists of collections, exact rational
//! divisions, spacing into registered chords and arpeggios, pitch trees and
//! the generative makers that build them.

pub mod errors;
pub mod models;
pub mod sequence;
pub mod spacing;
pub mod tree;
pub mod makers;
pub mod api;

// Re-export commonly used types
pub use errors::{PitchError, Result};
pub use makers::{Cursor, DesignMaker, ZaggedPitchClassMaker};
pub use models::*;
pub use sequence::Overhang;
pub use spacing::{ArpeggiationSpacingSpecifier, ChordalSpacingSpecifier, Direction, Spacing};
pub use tree::{LevelRun, Node, PitchTree};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("logger was already initialized");
    }

    log::info!("Pitch engine WASM module initialized");
}
