//! Terminal front end for the todo service.
//!
//! Wires `todo-core`'s controller to a blocking `ureq` transport, layered
//! settings, and a plain-text renderer.

pub mod app;
pub mod args;
pub mod render;
pub mod runtime;
pub mod settings;
pub mod shell;
pub mod transport;

pub use args::{Args, Command};
pub use settings::Settings;
pub use transport::UreqTransport;
