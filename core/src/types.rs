//! Domain DTOs for the todo API.
//!
//! # Design
//! `Todo` keeps any field it does not model in `extra`, so a local merge or a
//! re-serialization never drops server-side attributes such as timestamps.
//! The payload types are separate from the mock-server's; integration tests
//! catch schema drift.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Todo {
    pub fn new(id: i64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
            extra: Map::new(),
        }
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for an existing todo. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPatch {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TodoPatch {
    /// Shallow overwrite of the fields this patch carries.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
    }
}

/// Body of a delete request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoRef {
    pub id: i64,
}
