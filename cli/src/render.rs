use std::fmt::Write;

use todo_core::ViewState;

pub const EMPTY_LIST: &str = "No todos found. Start adding some!";

/// Plain-text view of the list: the error line first, then the items.
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}");
    }
    if state.loading {
        out.push_str("Loading...\n");
        return out;
    }
    if state.todos.is_empty() {
        let _ = writeln!(out, "{EMPTY_LIST}");
        return out;
    }
    for todo in &state.todos {
        let mark = if todo.completed { 'x' } else { ' ' };
        match &state.edit {
            Some(session) if session.id == todo.id => {
                let _ = writeln!(
                    out,
                    "[{mark}] {:>3}  {} (editing: {})",
                    todo.id, todo.title, session.draft
                );
            }
            _ => {
                let _ = writeln!(out, "[{mark}] {:>3}  {}", todo.id, todo.title);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use todo_core::{EditSession, Todo};

    use super::*;

    fn loaded(todos: Vec<Todo>) -> ViewState {
        ViewState {
            todos,
            loading: false,
            ..ViewState::default()
        }
    }

    #[test]
    fn shows_loading_before_first_sync() {
        assert_eq!(render(&ViewState::default()), "Loading...\n");
    }

    #[test]
    fn empty_list_has_a_hint() {
        assert_eq!(render(&loaded(Vec::new())), format!("{EMPTY_LIST}\n"));
    }

    #[test]
    fn items_show_completion_and_id() {
        let state = loaded(vec![Todo::new(1, "Milk", false), Todo::new(12, "Eggs", true)]);
        assert_eq!(render(&state), "[ ]   1  Milk\n[x]  12  Eggs\n");
    }

    #[test]
    fn error_line_comes_first_and_list_is_kept() {
        let mut state = loaded(vec![Todo::new(3, "Bread", false)]);
        state.error = Some("Failed to delete todo. Please try again.".to_string());
        assert_eq!(
            render(&state),
            "! Failed to delete todo. Please try again.\n[ ]   3  Bread\n"
        );
    }

    #[test]
    fn edited_item_shows_draft() {
        let mut state = loaded(vec![Todo::new(2, "Old", false)]);
        state.edit = Some(EditSession {
            id: 2,
            draft: "New".to_string(),
        });
        assert_eq!(render(&state), "[ ]   2  Old (editing: New)\n");
    }
}
