//! Collection list operations exposed to JavaScript
//!
//! Collection lists cross the boundary as arrays of
//! `{ order: "segment" | "set", items: { pitch_classes: [...] } }` objects
//! (or `items: { pitches: [...] }`).

use super::helpers::{deserialize, pitch_error, serialize};
use crate::models::CollectionList;
use crate::spacing::Spacing;
use crate::{wasm_info, wasm_log};
use wasm_bindgen::prelude::*;

/// Helianthate a collection list
///
/// # Parameters
/// - `collections_js`: collection list
/// - `n`: outer rotation step (positive rotates right)
/// - `m`: inner rotation step
///
/// # Returns
/// The helianthated collection list
#[wasm_bindgen(js_name = helianthate)]
pub fn helianthate(collections_js: JsValue, n: i32, m: i32) -> Result<JsValue, JsValue> {
    let collections: CollectionList = deserialize(collections_js, "Invalid collection list")?;
    wasm_info!("helianthate called: {} collections, n={}, m={}", collections.len(), n, m);

    let result = collections
        .helianthate(i64::from(n), i64::from(m))
        .map_err(|e| pitch_error("helianthate", e))?;

    wasm_log!("  helianthated into {} collections", result.len());
    serialize(&result, "Failed to serialize collection list")
}

/// Space a collection list with an arpeggiation or chordal specifier
///
/// # Parameters
/// - `collections_js`: collection list
/// - `spacing_js`: `{ kind: "arpeggiation" | "chordal", ... }`
///
/// # Returns
/// The spaced collection list, with pitches in the selected collections
#[wasm_bindgen(js_name = spaceCollections)]
pub fn space_collections(collections_js: JsValue, spacing_js: JsValue) -> Result<JsValue, JsValue> {
    let collections: CollectionList = deserialize(collections_js, "Invalid collection list")?;
    let spacing: Spacing = deserialize(spacing_js, "Invalid spacing specifier")?;
    wasm_info!("spaceCollections called: {} collections", collections.len());

    let result = spacing
        .apply(&collections)
        .map_err(|e| pitch_error("spaceCollections", e))?;

    wasm_log!("  spaced: {}", result);
    serialize(&result, "Failed to serialize collection list")
}
