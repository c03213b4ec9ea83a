//! Line-oriented interactive session.
//!
//! After `edit <id>` the next line is the draft title. A blank line or a line
//! containing Escape cancels without contacting the server.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use todo_core::{ApiError, TodoController, Transport};

use crate::render::render;

const ESCAPE: char = '\u{1b}';

pub const HELP: &str = "\
commands:
  add <title>    create a todo
  toggle <id>    flip done / not done
  edit <id>      rename; the next line is the new title (blank or Esc cancels)
  delete <id>    remove a todo
  reload         fetch the list again
  help           show this text
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Toggle(i64),
    Edit(i64),
    Delete(i64),
    Reload,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line; `Err` carries a message for the user.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word {
        "add" | "a" => ShellCommand::Add(rest.to_string()),
        "toggle" | "t" => ShellCommand::Toggle(parse_id(rest)?),
        "edit" | "e" => ShellCommand::Edit(parse_id(rest)?),
        "delete" | "d" | "rm" => ShellCommand::Delete(parse_id(rest)?),
        "reload" | "r" => ShellCommand::Reload,
        "help" | "?" => ShellCommand::Help,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

fn parse_id(text: &str) -> Result<i64, String> {
    text.parse()
        .map_err(|_| format!("expected a numeric id, got {text:?}"))
}

fn is_cancel(line: &str) -> bool {
    line.trim().is_empty() || line.contains(ESCAPE)
}

fn prompt<T: Transport, W: Write>(
    controller: &TodoController<T>,
    out: &mut W,
) -> std::io::Result<()> {
    match &controller.state().edit {
        Some(session) => write!(out, "edit #{}> ", session.id)?,
        None => write!(out, "> ")?,
    }
    out.flush()
}

/// Read commands until `quit` or end of input, printing the view after each.
pub async fn run<T, R, W>(
    controller: &mut TodoController<T>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let _ = controller.load().await;
    write!(out, "{}", render(controller.state()))?;
    prompt(controller, out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if controller.state().edit.is_some() {
            if is_cancel(&line) {
                controller.cancel_edit();
            } else {
                controller.set_draft(line.as_str());
                let _ = controller.save_edit().await;
            }
        } else {
            match parse(&line) {
                Ok(None) => {
                    prompt(controller, out)?;
                    continue;
                }
                Ok(Some(ShellCommand::Quit)) => break,
                Ok(Some(ShellCommand::Help)) => writeln!(out, "{HELP}")?,
                Ok(Some(command)) => apply(controller, command, out).await?,
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        write!(out, "{}", render(controller.state()))?;
        prompt(controller, out)?;
    }
    writeln!(out)?;
    Ok(())
}

async fn apply<T, W>(
    controller: &mut TodoController<T>,
    command: ShellCommand,
    out: &mut W,
) -> std::io::Result<()>
where
    T: Transport,
    W: Write,
{
    // Remote failures already sit in the error slot that `render` prints.
    let result = match command {
        ShellCommand::Add(title) => controller.create(&title).await,
        ShellCommand::Toggle(id) => controller.toggle(id).await,
        ShellCommand::Delete(id) => controller.delete(id).await,
        ShellCommand::Reload => controller.load().await,
        ShellCommand::Edit(id) => {
            if controller.begin_edit(id) {
                Ok(())
            } else {
                Err(ApiError::UnknownTodo(id))
            }
        }
        ShellCommand::Help | ShellCommand::Quit => Ok(()),
    };
    if let Err(ApiError::UnknownTodo(id)) = result {
        writeln!(out, "no todo with id {id}")?;
    }
    Ok(())
}
