use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Manage a remote todo list")]
pub struct Args {
    /// Settings file; missing is fine.
    #[arg(long, default_value = "todo.toml")]
    pub config: String,

    /// Server root, e.g. http://127.0.0.1:3000
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (0 waits forever)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Reload the whole list after every change instead of merging locally
    #[arg(long)]
    pub refetch: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show all todos
    List,
    /// Add a todo
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Flip a todo between done and not done
    Toggle { id: i64 },
    /// Rename a todo
    Edit {
        id: i64,
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Remove a todo
    Delete { id: i64 },
    /// Interactive session reading commands from stdin
    Shell,
}
