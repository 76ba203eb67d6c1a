//! Hover and star state of a table.
//!
//! Hover is positional: it names the rendered row under the pointer. Stars are keyed
//! by [`RowId`], so a refetch or reorder keeps each mark on its record.

use std::collections::BTreeSet;

use log::debug;

use crate::RowId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowInteractionState {
    hovered: Option<usize>,
    starred: BTreeSet<RowId>,
}

impl RowInteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered == Some(index)
    }

    /// The pointer entered row `index`. Replaces any previous hover.
    pub fn pointer_enter(&mut self, index: usize) {
        if self.hovered != Some(index) {
            debug!("Hover row {index}");
        }
        self.hovered = Some(index);
    }

    /// The pointer left the rows. Clears the hover whichever row it was on.
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    /// Drops a hover that no longer points into a dataset of `len` rows.
    pub fn retain_rows(&mut self, len: usize) {
        if self.hovered.is_some_and(|index| index >= len) {
            self.hovered = None;
        }
    }

    pub fn is_starred(&self, id: RowId) -> bool {
        self.starred.contains(&id)
    }

    /// Flips the star of `id`. Returns whether it is starred afterwards.
    pub fn toggle_star(&mut self, id: RowId) -> bool {
        let starred = if self.starred.remove(&id) {
            false
        } else {
            self.starred.insert(id);
            true
        };
        debug!("Row {id} starred: {starred}");
        starred
    }

    pub fn starred(&self) -> impl Iterator<Item = RowId> + '_ {
        self.starred.iter().copied()
    }
}
