use serde::{Deserialize, Serialize};

/// A persisted todo item. This is also the exact JSON stored in the `todos`
/// table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Request body for create and update. Every field is optional. A body `id`
/// of any JSON type is skipped with the other unknown fields; the stored id
/// always comes from the sequence or the path.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoInput {
    /// Build the record to persist, discarding any client-supplied id.
    pub fn into_todo(self, id: u64) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
        }
    }
}
