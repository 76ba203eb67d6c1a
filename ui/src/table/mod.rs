//! A generic data table with hover affordances.
//!
//! - `columns`: column schema and sizes
//! - `header`: header row
//! - `row`: body rows and [`RowAction`]
//! - `cells`: the star/edit/delete cluster shown on the hovered row
//!
//! Rows are shown in input order. Hover follows the pointer every frame; the action
//! cluster is drawn on the row that was hovered when the frame started.

mod cells;
pub mod columns;
mod header;
mod row;

pub use cells::{DELETE_GLYPH, EDIT_GLYPH, STARRED_GLYPH, UNSTARRED_GLYPH};
pub use columns::{CellRenderer, ColumnKind, ColumnSpec, user_columns};
pub use row::RowAction;

use egui::{Align, Layout, Sense, Ui};
use egui_extras::{Column, TableBuilder};
use roster_business::{RowInteractionState, Tabular};

use cells::ActionClick;
use columns::{ACTIONS_WIDTH, HEADER_HEIGHT, ROW_HEIGHT};
use header::render_table_header;
use row::{RowData, render_row};

pub struct TableView<T: Tabular> {
    columns: Vec<ColumnSpec<T>>,
    interaction: RowInteractionState,
}

impl<T: Tabular> TableView<T> {
    pub fn new(columns: Vec<ColumnSpec<T>>) -> Self {
        Self {
            columns,
            interaction: RowInteractionState::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnSpec<T>] {
        &self.columns
    }

    pub fn interaction(&self) -> &RowInteractionState {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut RowInteractionState {
        &mut self.interaction
    }

    /// Draws `rows` and updates hover/star state from this frame's input.
    pub fn show(&mut self, ui: &mut Ui, rows: &[T]) -> Option<RowAction> {
        self.interaction.retain_rows(rows.len());

        let pointer = ui.ctx().pointer_hover_pos();
        let hovered = self.interaction.hovered();
        let columns = &self.columns;
        let interaction = &self.interaction;
        let mut pointer_row = None;
        let mut action = None;

        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .sense(Sense::hover())
            .cell_layout(Layout::left_to_right(Align::Center));
        for column in columns {
            builder = builder.column(column.width());
        }
        builder = builder.column(Column::exact(ACTIONS_WIDTH));

        builder
            .header(HEADER_HEIGHT, |mut header| {
                render_table_header(&mut header, columns);
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let index = row.index();
                    let Some(record) = rows.get(index) else {
                        return;
                    };
                    let id = record.row_id();
                    let data = RowData {
                        record,
                        hovered: hovered == Some(index),
                        starred: interaction.is_starred(id),
                    };

                    if let Some(click) = render_row(&mut row, columns, &data) {
                        action = Some((index, id, click));
                    }
                    if pointer.is_some_and(|pos| row.response().rect.contains(pos)) {
                        pointer_row = Some(index);
                    }
                });
            });

        match pointer_row {
            Some(index) => self.interaction.pointer_enter(index),
            None => self.interaction.pointer_leave(),
        }

        action.map(|(index, id, click)| match click {
            ActionClick::Star => RowAction::ToggleStar {
                index,
                id,
                starred: self.interaction.toggle_star(id),
            },
            ActionClick::Edit => RowAction::Edit { index, id },
            ActionClick::Delete => RowAction::Delete { index, id },
        })
    }
}
