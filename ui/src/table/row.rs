use egui_extras::TableRow;
use roster_business::{RowId, Tabular};

use super::cells::{ActionClick, render_row_actions};
use super::columns::ColumnSpec;

/// What the user asked for on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// The star was flipped; `starred` is the new membership.
    ToggleStar {
        index: usize,
        id: RowId,
        starred: bool,
    },
    Edit {
        index: usize,
        id: RowId,
    },
    Delete {
        index: usize,
        id: RowId,
    },
}

impl RowAction {
    pub fn index(&self) -> usize {
        match self {
            Self::ToggleStar { index, .. } | Self::Edit { index, .. } | Self::Delete { index, .. } => {
                *index
            }
        }
    }
}

pub struct RowData<'a, T> {
    pub record: &'a T,
    pub hovered: bool,
    pub starred: bool,
}

/// Renders the data cells of one row and, when hovered, its action cluster.
///
/// Returns the clicked action; the caller applies star toggles.
#[inline]
pub fn render_row<T: Tabular>(
    row: &mut TableRow<'_, '_>,
    columns: &[ColumnSpec<T>],
    data: &RowData<'_, T>,
) -> Option<ActionClick> {
    row.set_hovered(data.hovered);

    for column in columns {
        row.col(|ui| column.show_cell(ui, data.record));
    }

    let mut clicked = None;
    row.col(|ui| {
        if data.hovered {
            clicked = render_row_actions(ui, data.starred);
        }
    });
    clicked
}
