use egui_extras::TableRow;
use roster_business::Tabular;

use super::columns::ColumnSpec;

/// Renders one bold label per column, then the empty action column.
#[inline]
pub fn render_table_header<T: Tabular>(header: &mut TableRow<'_, '_>, columns: &[ColumnSpec<T>]) {
    for column in columns {
        header.col(|ui| {
            ui.strong(column.header());
        });
    }
    header.col(|_ui| {});
}
