//! Error types for the todo API client.
//!
//! # Design
//! Every non-2xx response lands in `HttpError` with the raw status code and
//! body for diagnostics; callers never branch on specific codes. Transport,
//! timeout and cancellation failures come from the controller's I/O path
//! rather than from the parsers.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by `TodoClient`, `Transport` implementations and
/// `TodoController` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,

    /// The controller holds no todo with this id.
    #[error("no todo with id {0}")]
    UnknownTodo(i64),
}

/// The four remote operations, used to pick the user-facing failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    Update,
    Delete,
}

impl Operation {
    /// Message written to the controller's error slot when this operation
    /// fails. Causes are collapsed; the detail goes to the log.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Failed to load todos. Please try again.",
            Operation::Add => "Failed to add todo. Please try again.",
            Operation::Update => "Failed to update todo. Please try again.",
            Operation::Delete => "Failed to delete todo. Please try again.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}
