//! Pitch tree construction exposed to JavaScript
//!
//! Trees cross the boundary as their level runs: one entry per group, in
//! depth-first order, giving the group's level and the leaves it covers.
//! That is what a renderer needs to draw grouping brackets.

use super::helpers::{deserialize, pitch_error, serialize};
use crate::makers::ZaggedPitchClassMaker;
use crate::models::{CollectionList, Item};
use crate::tree::{LevelRun, PitchTree};
use crate::{wasm_info, wasm_log, wasm_warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct TreeView {
    display: String,
    leaves: Vec<Item>,
    runs: Vec<LevelRun>,
}

impl From<&PitchTree> for TreeView {
    fn from(tree: &PitchTree) -> Self {
        Self {
            display: tree.to_string(),
            leaves: tree.leaves(),
            runs: tree.level_runs(),
        }
    }
}

/// Run the zagged pitch-class maker
///
/// # Parameters
/// - `config_js`: `{ pc_cells, division_ratios?, grouping_counts?, spacing? }`
///
/// # Returns
/// `{ display, leaves, runs }` for the resulting tree
#[wasm_bindgen(js_name = makeZaggedPitchClasses)]
pub fn make_zagged_pitch_classes(config_js: JsValue) -> Result<JsValue, JsValue> {
    let maker: ZaggedPitchClassMaker = deserialize(config_js, "Invalid zagged maker config")?;
    wasm_info!("makeZaggedPitchClasses called: {} cells", maker.pc_cells.len());
    if maker.grouping_counts.iter().all(|&count| count == 0) {
        wasm_warn!("  grouping counts are all zero; pieces form a single group");
    }

    let tree = maker
        .make()
        .map_err(|e| pitch_error("makeZaggedPitchClasses", e))?;

    wasm_info!("  tree has {} groups, {} leaves", tree.len(), tree.leaf_count());
    serialize(&TreeView::from(&tree), "Failed to serialize pitch tree")
}

/// Level runs of the tree built from nested collection lists
///
/// # Parameters
/// - `groups_js`: array of collection lists, one per top-level group
///
/// # Returns
/// JavaScript array of `{ level, leaves }` objects in depth-first order
#[wasm_bindgen(js_name = pitchTreeLevelRuns)]
pub fn pitch_tree_level_runs(groups_js: JsValue) -> Result<js_sys::Array, JsValue> {
    let groups: Vec<CollectionList> = deserialize(groups_js, "Invalid collection list groups")?;
    wasm_info!("pitchTreeLevelRuns called: {} groups", groups.len());

    let tree = PitchTree::from_groups(&groups)
        .map_err(|e| pitch_error("pitchTreeLevelRuns", e))?;

    let result = js_sys::Array::new();
    for run in tree.level_runs() {
        let run_js = serialize(&run, "Failed to serialize level run")?;
        result.push(&run_js);
    }

    wasm_log!("  {} level runs over {} leaves", result.length(), tree.leaf_count());
    Ok(result)
}
