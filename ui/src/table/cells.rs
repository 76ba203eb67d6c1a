//! The floating action cluster of a hovered row.

use egui::{Button, Frame, Ui};

/// Shown when the row is starred.
pub const STARRED_GLYPH: &str = "★";
pub const UNSTARRED_GLYPH: &str = "☆";
pub const EDIT_GLYPH: &str = "✏";
pub const DELETE_GLYPH: &str = "🗑";

/// Which action button was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClick {
    Star,
    Edit,
    Delete,
}

/// Renders star, edit and delete buttons in a popup-styled frame.
#[inline]
pub fn render_row_actions(ui: &mut Ui, starred: bool) -> Option<ActionClick> {
    let mut clicked = None;

    Frame::popup(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            let star = if starred { STARRED_GLYPH } else { UNSTARRED_GLYPH };
            let star_hint = if starred { "Unstar" } else { "Star" };
            if ui.add(Button::new(star).frame(false)).on_hover_text(star_hint).clicked() {
                clicked = Some(ActionClick::Star);
            }
            if ui.add(Button::new(EDIT_GLYPH).frame(false)).on_hover_text("Edit").clicked() {
                clicked = Some(ActionClick::Edit);
            }
            if ui
                .add(Button::new(DELETE_GLYPH).frame(false))
                .on_hover_text("Delete")
                .clicked()
            {
                clicked = Some(ActionClick::Delete);
            }
        });
    });

    clicked
}
