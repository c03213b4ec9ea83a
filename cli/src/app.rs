//! One-shot subcommands: sync, apply one operation, print the view.

use std::io::Write;

use todo_core::{ApiError, TodoController, Transport};

use crate::args::Command;
use crate::render::render;
use crate::shell;

/// Run `command` against the controller and print the resulting view.
/// Returns whether the operation succeeded.
pub async fn execute<T, W>(
    controller: &mut TodoController<T>,
    command: Command,
    out: &mut W,
) -> anyhow::Result<bool>
where
    T: Transport,
    W: Write,
{
    if let Command::Shell = command {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        shell::run(controller, stdin, out).await?;
        return Ok(true);
    }

    if controller.load().await.is_err() {
        write!(out, "{}", render(controller.state()))?;
        return Ok(false);
    }

    let result = match command {
        Command::List | Command::Shell => Ok(()),
        Command::Add { title } => controller.create(&title.join(" ")).await,
        Command::Toggle { id } => controller.toggle(id).await,
        Command::Edit { id, title } => {
            if controller.begin_edit(id) {
                controller.set_draft(title.join(" "));
                controller.save_edit().await
            } else {
                Err(ApiError::UnknownTodo(id))
            }
        }
        Command::Delete { id } => controller.delete(id).await,
    };

    if let Err(ApiError::UnknownTodo(id)) = &result {
        writeln!(out, "no todo with id {id}")?;
    }
    write!(out, "{}", render(controller.state()))?;
    Ok(result.is_ok())
}
