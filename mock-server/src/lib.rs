use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub id: i64,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct DeleteTodo {
    pub id: i64,
}

/// In-memory collection. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct Store {
    last_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl Store {
    pub fn insert(&mut self, input: CreateTodo) -> Todo {
        self.last_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: self.last_id,
            title: input.title,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }

    pub fn update(&mut self, input: UpdateTodo) -> Option<Todo> {
        let todo = self.todos.get_mut(&input.id)?;
        if let Some(title) = input.title {
            todo.title = title;
        }
        if let Some(completed) = input.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();
        Some(todo.clone())
    }

    pub fn remove(&mut self, id: i64) -> Option<Todo> {
        self.todos.remove(&id)
    }

    /// Snapshot in ascending id order.
    pub fn list(&self) -> Vec<Todo> {
        self.todos.values().cloned().collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(list_todos).post(create_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.list())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = db.write().await.insert(input);
    log::debug!("created todo {}", todo.id);
    (StatusCode::CREATED, Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let id = input.id;
    db.write().await.update(input).map(Json).ok_or_else(|| {
        log::debug!("update on missing todo {id}");
        StatusCode::NOT_FOUND
    })
}

async fn delete_todo(
    State(db): State<Db>,
    Json(input): Json<DeleteTodo>,
) -> Result<StatusCode, StatusCode> {
    db.write()
        .await
        .remove(input.id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            completed: false,
        }
    }

    #[test]
    fn todo_serializes_timestamps_as_rfc3339() {
        let mut store = Store::default();
        let todo = store.insert(create("Test"));
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        let stamp = json["created_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let mut store = Store::default();
        assert_eq!(store.insert(create("a")).id, 1);
        assert_eq!(store.insert(create("b")).id, 2);
        store.remove(2);
        assert_eq!(store.insert(create("c")).id, 3);
        let ids: Vec<i64> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut store = Store::default();
        let created = store.insert(create("Walk dog"));
        let updated = store
            .update(UpdateTodo {
                id: created.id,
                title: None,
                completed: Some(true),
            })
            .unwrap();
        assert_eq!(updated.title, "Walk dog");
        assert!(updated.completed);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_missing_todo_returns_none() {
        let mut store = Store::default();
        let result = store.update(UpdateTodo {
            id: 9,
            title: Some("x".to_string()),
            completed: None,
        });
        assert!(result.is_none());
    }

    #[test]
    fn create_todo_defaults_completed_to_false() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"No completed field"}"#).unwrap();
        assert_eq!(input.title, "No completed field");
        assert!(!input.completed);
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_requires_id() {
        let result: Result<UpdateTodo, _> = serde_json::from_str(r#"{"title":"New title"}"#);
        assert!(result.is_err());

        let input: UpdateTodo = serde_json::from_str(r#"{"id":2,"title":"New title"}"#).unwrap();
        assert_eq!(input.title.as_deref(), Some("New title"));
        assert!(input.completed.is_none());
    }
}
