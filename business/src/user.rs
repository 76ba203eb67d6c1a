use serde::{Deserialize, Serialize};

use crate::{RowId, Tabular};

/// One user as returned by the users endpoint. Extra JSON fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub username: String,
}

/// Accessor keys of [`UserRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Email,
    Username,
}

impl Tabular for UserRecord {
    type Field = UserField;

    fn cell_text(&self, field: UserField) -> String {
        match field {
            UserField::Id => self.id.to_string(),
            UserField::Name => self.name.clone(),
            UserField::Email => self.email.clone(),
            UserField::Username => self.username.clone(),
        }
    }

    fn row_id(&self) -> RowId {
        RowId(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> UserRecord {
        UserRecord {
            id: 1,
            name: "Ana".to_owned(),
            email: "a@x.com".to_owned(),
            username: "ana".to_owned(),
        }
    }

    #[test]
    fn cell_text_follows_accessor() {
        let user = ana();
        let cells: Vec<String> = [
            UserField::Id,
            UserField::Name,
            UserField::Email,
            UserField::Username,
        ]
        .into_iter()
        .map(|field| user.cell_text(field))
        .collect();

        assert_eq!(cells, vec!["1", "Ana", "a@x.com", "ana"]);
        assert_eq!(user.row_id(), RowId(1));
    }

    #[test]
    fn deserialize_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "Ana",
            "username": "ana",
            "email": "a@x.com",
            "phone": "1-770-736-8031",
            "address": { "city": "Gwenborough" }
        }"#;

        let user: UserRecord = serde_json::from_str(json).expect("valid user");
        assert_eq!(user, ana());
    }

    #[test]
    fn deserialize_rejects_missing_fields() {
        let json = r#"{ "id": 1, "name": "Ana" }"#;
        assert!(serde_json::from_str::<UserRecord>(json).is_err());
    }
}
