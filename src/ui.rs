//! Side-panel view model: lens status rows in shuffled menu order.
//!
//! The panel lists one row per lens, ordered by the menu permutation fixed
//! at construction, so the 1-9 hotkeys address panel slots rather than
//! lens-table indices. Rows are plain serializable values; the host renders
//! them however it likes (the bundled shell writes them into the DOM).

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use serde::Serialize;

use crate::sim::SimCore;

/// One side-panel row.
#[derive(Debug, Clone, Serialize)]
pub struct LensStatusRow {
    /// Lens display name.
    pub name: String,
    /// Lens accent color.
    pub color: String,
    /// 1-based face number currently pointing up.
    pub face: u32,
    /// Whether this row's lens is receiving rotation input.
    pub active: bool,
    /// Whether this row's lens sits on its correct face.
    pub solved: bool,
}

/// Build the panel rows for the current core state, in menu order.
#[must_use]
pub fn status_rows(core: &SimCore) -> Vec<LensStatusRow> {
    let sides = core.config().telescope.sides;
    core.menu_order()
        .iter()
        .map(|&index| {
            let lens = &core.lenses()[index];
            LensStatusRow {
                name: lens.name.clone(),
                color: lens.color.clone(),
                face: lens.face_indicator(sides),
                active: index == core.active_lens(),
                solved: core.solved()[index],
            }
        })
        .collect()
}
