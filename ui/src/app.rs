use std::fmt::Display;

use log::debug;
use roster_business::{UserRecord, users_query};
use roster_states::QueryState;

use crate::state::State;
use crate::table::{RowAction, TableView, user_columns};

type RecordHandler = Box<dyn FnMut(&UserRecord)>;

pub struct RosterApp {
    state: State,
    table: TableView<UserRecord>,
    on_edit: Option<RecordHandler>,
    on_delete: Option<RecordHandler>,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            table: TableView::new(user_columns()),
            on_edit: None,
            on_delete: None,
        }
    }

    /// Called with the record whose edit button was clicked.
    pub fn on_edit(mut self, handler: impl FnMut(&UserRecord) + 'static) -> Self {
        self.on_edit = Some(Box::new(handler));
        self
    }

    /// Called with the record whose delete button was clicked.
    pub fn on_delete(mut self, handler: impl FnMut(&UserRecord) + 'static) -> Self {
        self.on_delete = Some(Box::new(handler));
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn table(&self) -> &TableView<UserRecord> {
        &self.table
    }

    /// Renders the users query: loading, error, or the table.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        match self.state.users.state(&users_query()) {
            None | Some(QueryState::Pending) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            }
            Some(QueryState::Error(err)) => {
                ui.label(error_text(err));
            }
            Some(QueryState::Success(users)) => {
                ui.heading("User Table");
                ui.add_space(8.0);
                if let Some(action) = self.table.show(ui, users) {
                    dispatch_row_action(action, users, &mut self.on_edit, &mut self.on_delete);
                }
            }
        }
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.sync(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| self.ui(ui));
    }
}

/// `Error: <message>`, or `Error: Unknown error` when the error has no message.
pub fn error_text(err: &impl Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        "Error: Unknown error".to_owned()
    } else {
        format!("Error: {message}")
    }
}

fn dispatch_row_action(
    action: RowAction,
    users: &[UserRecord],
    on_edit: &mut Option<RecordHandler>,
    on_delete: &mut Option<RecordHandler>,
) {
    let (handler, name) = match action {
        RowAction::ToggleStar { id, starred, .. } => {
            debug!("User {id} starred: {starred}");
            return;
        }
        RowAction::Edit { .. } => (on_edit, "edit"),
        RowAction::Delete { .. } => (on_delete, "delete"),
    };

    let Some(user) = users.get(action.index()) else {
        return;
    };
    match handler {
        Some(handler) => handler(user),
        None => debug!("No {name} handler for user {}", user.id),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use roster_business::{FetchUsersError, RowId};

    use super::*;

    fn users() -> Vec<UserRecord> {
        vec![
            UserRecord {
                id: 1,
                name: "Ana".to_owned(),
                email: "a@x.com".to_owned(),
                username: "ana".to_owned(),
            },
            UserRecord {
                id: 2,
                name: "Bo".to_owned(),
                email: "b@x.com".to_owned(),
                username: "bo".to_owned(),
            },
        ]
    }

    #[test]
    fn error_text_uses_error_message() {
        let err = FetchUsersError::Network { status: 500 };
        assert_eq!(error_text(&err), "Error: Network response was not ok");
    }

    #[test]
    fn error_text_falls_back_for_empty_message() {
        let err = FetchUsersError::Transport(String::new());
        assert_eq!(error_text(&err), "Error: Unknown error");
    }

    #[test]
    fn edit_and_delete_reach_their_handlers() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let edits = Rc::clone(&seen);
        let deletes = Rc::clone(&seen);
        let mut on_edit: Option<RecordHandler> = Some(Box::new(move |user: &UserRecord| {
            edits.borrow_mut().push(format!("edit {}", user.name));
        }));
        let mut on_delete: Option<RecordHandler> = Some(Box::new(move |user: &UserRecord| {
            deletes.borrow_mut().push(format!("delete {}", user.name));
        }));

        let rows = users();
        dispatch_row_action(
            RowAction::Edit { index: 1, id: RowId(2) },
            &rows,
            &mut on_edit,
            &mut on_delete,
        );
        dispatch_row_action(
            RowAction::Delete { index: 0, id: RowId(1) },
            &rows,
            &mut on_edit,
            &mut on_delete,
        );
        dispatch_row_action(
            RowAction::ToggleStar {
                index: 0,
                id: RowId(1),
                starred: true,
            },
            &rows,
            &mut on_edit,
            &mut on_delete,
        );

        assert_eq!(*seen.borrow(), vec!["edit Bo", "delete Ana"]);
    }

    #[test]
    fn missing_handler_is_ignored() {
        let rows = users();
        dispatch_row_action(
            RowAction::Delete { index: 0, id: RowId(1) },
            &rows,
            &mut None,
            &mut None,
        );
        // Out-of-range rows are ignored as well.
        dispatch_row_action(
            RowAction::Edit { index: 9, id: RowId(9) },
            &rows,
            &mut None,
            &mut None,
        );
    }
}
