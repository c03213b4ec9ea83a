//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! All four operations address the single collection resource `/api/todos`;
//! update and delete carry the target id in the JSON body.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTodo, Todo, TodoPatch, TodoRef};

const COLLECTION_PATH: &str = "/api/todos";

/// Synchronous, stateless client for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{COLLECTION_PATH}", self.base_url)
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: self.collection_url(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, input)
    }

    pub fn build_update_todo(&self, patch: &TodoPatch) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, patch)
    }

    pub fn build_delete_todo(&self, id: i64) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Delete, &TodoRef { id })
    }

    /// An absent body, `null`, or any non-array JSON value reads as an empty
    /// collection.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        match parse_body(&response)? {
            Some(value @ Value::Array(_)) => serde_json::from_value(value)
                .map_err(|e| ApiError::DeserializationError(e.to_string())),
            _ => Ok(Vec::new()),
        }
    }

    /// Returns the created todo when the server echoes one back, `None` for a
    /// bare acknowledgement.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        check_status(&response)?;
        Ok(parse_body(&response)?.and_then(|value| serde_json::from_value(value).ok()))
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Every non-2xx status is a failure; no code gets special treatment.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_body(response: &HttpResponse) -> Result<Option<Value>, ApiError> {
    let body = response.body.trim();
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let input = NewTodo {
            title: "Buy milk".to_string(),
            completed: false,
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "Buy milk", "completed": false}));
    }

    #[test]
    fn build_update_todo_sends_only_present_fields() {
        let patch = TodoPatch {
            id: 4,
            completed: None,
            title: Some("Updated".to_string()),
        };
        let req = client().build_update_todo(&patch).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 4);
        assert_eq!(body["title"], "Updated");
        assert!(body.get("completed").is_none());
    }

    #[test]
    fn build_delete_todo_carries_id_in_body() {
        let req = client().build_delete_todo(3).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"id": 3}));
    }

    #[test]
    fn parse_list_todos_success() {
        let response = HttpResponse::new(200, r#"[{"id":1,"title":"Test","completed":false}]"#);
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(todos, vec![Todo::new(1, "Test", false)]);
    }

    #[test]
    fn parse_list_todos_absent_payload_is_empty() {
        for body in ["", "   ", "null", "{}"] {
            let todos = client().parse_list_todos(HttpResponse::new(200, body)).unwrap();
            assert!(todos.is_empty(), "body {body:?} should read as empty");
        }
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client()
            .parse_list_todos(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_todos_malformed_item() {
        let err = client()
            .parse_list_todos(HttpResponse::new(200, r#"[{"id":"one"}]"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_todos_server_error() {
        let err = client()
            .parse_list_todos(HttpResponse::new(500, "boom"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_create_todo_returns_echoed_todo() {
        let response = HttpResponse::new(201, r#"{"id":9,"title":"New","completed":false}"#);
        let todo = client().parse_create_todo(response).unwrap();
        assert_eq!(todo, Some(Todo::new(9, "New", false)));
    }

    #[test]
    fn parse_create_todo_accepts_bare_ack() {
        let todo = client()
            .parse_create_todo(HttpResponse::new(200, r#"{"ok":true}"#))
            .unwrap();
        assert!(todo.is_none());
    }

    #[test]
    fn parse_create_todo_accepts_empty_body() {
        for response in [HttpResponse::new(201, ""), HttpResponse::new(204, "  ")] {
            assert_eq!(client().parse_create_todo(response).unwrap(), None);
        }
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn not_found_is_an_ordinary_http_error() {
        let err = client()
            .parse_delete_todo(HttpResponse::new(404, "Todo not found"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
    }

    #[test]
    fn parse_update_and_delete_ignore_body() {
        assert!(client().parse_update_todo(HttpResponse::new(200, "garbage")).is_ok());
        assert!(client().parse_delete_todo(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/api/todos");
    }
}
