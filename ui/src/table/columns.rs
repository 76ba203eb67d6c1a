//! Column schema of a [`super::TableView`].

use egui::Ui;
use egui_extras::Column;
use roster_business::{Tabular, UserField, UserRecord};

pub const ID_WIDTH: f32 = 50.0;
pub const ACTIONS_WIDTH: f32 = 110.0;
pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Draws a cell from a whole row.
pub type CellRenderer<T> = Box<dyn Fn(&mut Ui, &T)>;

/// How a column turns a row into cell content.
pub enum ColumnKind<T: Tabular> {
    /// The text of one accessor.
    PlainText(T::Field),
    /// Arbitrary widgets.
    Custom(CellRenderer<T>),
}

impl<T: Tabular> std::fmt::Debug for ColumnKind<T>
where
    T::Field: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlainText(field) => f.debug_tuple("PlainText").field(field).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

pub struct ColumnSpec<T: Tabular> {
    header: &'static str,
    kind: ColumnKind<T>,
    width: Column,
}

impl<T: Tabular> ColumnSpec<T> {
    pub fn text(header: &'static str, field: T::Field) -> Self {
        Self {
            header,
            kind: ColumnKind::PlainText(field),
            width: Column::auto().at_least(80.0),
        }
    }

    pub fn custom(header: &'static str, render: impl Fn(&mut Ui, &T) + 'static) -> Self {
        Self {
            header,
            kind: ColumnKind::Custom(Box::new(render)),
            width: Column::auto().at_least(80.0),
        }
    }

    pub fn with_width(mut self, width: Column) -> Self {
        self.width = width;
        self
    }

    pub fn header(&self) -> &'static str {
        self.header
    }

    pub fn kind(&self) -> &ColumnKind<T> {
        &self.kind
    }

    pub fn width(&self) -> Column {
        self.width
    }

    /// Cell text under this column, `None` for custom columns.
    pub fn cell_text(&self, row: &T) -> Option<String> {
        match &self.kind {
            ColumnKind::PlainText(field) => Some(row.cell_text(*field)),
            ColumnKind::Custom(_) => None,
        }
    }

    pub(crate) fn show_cell(&self, ui: &mut Ui, row: &T) {
        match &self.kind {
            ColumnKind::PlainText(field) => {
                ui.label(row.cell_text(*field));
            }
            ColumnKind::Custom(render) => render(ui, row),
        }
    }
}

/// ID, Name, Email, Username.
pub fn user_columns() -> Vec<ColumnSpec<UserRecord>> {
    vec![
        ColumnSpec::text("ID", UserField::Id).with_width(Column::exact(ID_WIDTH)),
        ColumnSpec::text("Name", UserField::Name),
        ColumnSpec::text("Email", UserField::Email),
        ColumnSpec::text("Username", UserField::Username)
            .with_width(Column::remainder().at_least(80.0)),
    ]
}
