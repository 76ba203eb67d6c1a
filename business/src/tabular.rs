//! Row types the table can display.

use std::fmt::{Display, Formatter};

/// Stable identity of a row, independent of its position in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record that can be laid out as a table row.
///
/// `Field` is the accessor key type: one variant per displayable field.
pub trait Tabular {
    type Field: Copy;

    /// Text shown for `field`.
    fn cell_text(&self, field: Self::Field) -> String;

    fn row_id(&self) -> RowId;
}
