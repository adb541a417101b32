//! Command-line front end for the tasklist todo store.
//!
//! One invocation runs one command against the JSON file and prints a
//! human-readable result. Todos are addressed by their 1-based position in
//! the list, never by id.
//!
//! Usage mistakes (blank text, bad positions, unknown commands) are reported
//! on stdout and leave the file untouched; they are not errors. Only storage
//! failures make [`run`] return `Err`.

use anyhow::bail;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tasklist_core::types::parse_leading_integer;
use tasklist_core::{TodoAction, TodoError, TodoOutcome, TodoService};

/// Store location used when neither `--file` nor `TODO_FILE` is given.
pub const DEFAULT_TODO_FILE: &str = "todos.json";

/// Printed when `add` gets no usable text.
pub const MISSING_TEXT: &str = "Please provide a task name.";

/// Printed when `done`/`remove` get a position outside the list.
pub const INVALID_POSITION: &str = "Invalid task number.";

/// Printed by `list` on an empty list.
pub const NO_TASKS: &str = "No tasks yet!";

/// Manage a todo list stored in a JSON file
#[derive(Debug, Parser)]
#[command(name = "todo", version)]
pub struct Cli {
    /// JSON file holding the todos
    #[arg(long, global = true, env = "TODO_FILE", default_value = DEFAULT_TODO_FILE)]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One CLI operation.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a new todo
    Add {
        /// Task text; words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Show all todos
    List,
    /// Mark a todo as done
    Done {
        /// 1-based task number
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove a todo
    Remove {
        /// 1-based task number
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove all todos
    Clear,
}

/// Runs one command and writes its report to `out`.
///
/// `None` prints the usage help.
///
/// # Errors
///
/// Returns an error if the todo file cannot be read, parsed or written, or
/// if writing to `out` fails.
pub fn run(command: Option<Command>, service: &TodoService, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(command) = command else {
        return write_help(out);
    };
    tracing::debug!(?command, "running command");

    match command {
        Command::Add { words } => {
            let text = words.join(" ");
            report(service.send(TodoAction::Add { text }), out)
        }
        Command::List => list(service, out),
        Command::Done { args } => match parse_position(&args) {
            Some(position) => report(service.send(TodoAction::CompleteAt { position }), out),
            None => report(Err(TodoError::InvalidPosition(0)), out),
        },
        Command::Remove { args } => match parse_position(&args) {
            Some(position) => report(service.send(TodoAction::RemoveAt { position }), out),
            None => report(Err(TodoError::InvalidPosition(0)), out),
        },
        Command::Clear => report(service.send(TodoAction::Clear), out),
    }
}

/// Writes the usage help.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_help(out: &mut impl Write) -> anyhow::Result<()> {
    let mut command = Cli::command();
    writeln!(out, "{}", command.render_help())?;
    Ok(())
}

/// Reads a 1-based position from the first argument.
///
/// Parsing is lenient (`"2nd"` is 2). Missing, non-numeric, zero and
/// negative values yield `None`.
#[must_use]
pub fn parse_position(args: &[String]) -> Option<usize> {
    let raw = args.first()?;
    let n = parse_leading_integer(raw)?;
    usize::try_from(n).ok().filter(|&p| p >= 1)
}

fn list(service: &TodoService, out: &mut impl Write) -> anyhow::Result<()> {
    let todos = service.list()?;
    if todos.is_empty() {
        writeln!(out, "{NO_TASKS}")?;
        return Ok(());
    }

    for (index, todo) in todos.items().iter().enumerate() {
        let mark = if todo.done { "x" } else { " " };
        writeln!(out, "{}. [{mark}] {}", index + 1, todo.text)?;
    }
    Ok(())
}

fn report(result: Result<TodoOutcome, TodoError>, out: &mut impl Write) -> anyhow::Result<()> {
    match result {
        Ok(TodoOutcome::Added(todo)) => writeln!(out, "Added: {}", todo.text)?,
        Ok(TodoOutcome::Completed(todo)) => writeln!(out, "Marked as done: {}", todo.text)?,
        Ok(TodoOutcome::Removed(todo)) => writeln!(out, "Removed: {}", todo.text)?,
        Ok(TodoOutcome::Cleared { .. }) => writeln!(out, "Cleared all todos.")?,
        Err(TodoError::EmptyText) => writeln!(out, "{MISSING_TEXT}")?,
        Err(TodoError::InvalidPosition(_)) => writeln!(out, "{INVALID_POSITION}")?,
        Err(TodoError::Storage(error)) => return Err(error.into()),
        Ok(other) => bail!("unexpected outcome for a CLI command: {other:?}"),
        Err(other) => bail!("unexpected error for a CLI command: {other}"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("todo").chain(args.iter().copied()))
    }

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_add_joins_later() {
        let cli = parse(&["add", "Buy", "some", "milk"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Add {
                words: strings(&["Buy", "some", "milk"])
            })
        );
    }

    #[test]
    fn test_parse_add_without_words() {
        let cli = parse(&["add"]).unwrap();
        assert_eq!(cli.command, Some(Command::Add { words: vec![] }));
    }

    #[test]
    fn test_parse_negative_position_is_a_value() {
        let cli = parse(&["done", "-1"]).unwrap();
        assert_eq!(cli.command, Some(Command::Done { args: strings(&["-1"]) }));
    }

    #[test]
    fn test_parse_no_command() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_parse_unknown_command_fails() {
        assert!(parse(&["frobnicate"]).is_err());
    }

    #[test]
    fn test_parse_file_flag() {
        let cli = parse(&["--file", "/tmp/other.json", "list"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("/tmp/other.json"));
        assert_eq!(cli.command, Some(Command::List));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(&strings(&["2"])), Some(2));
        assert_eq!(parse_position(&strings(&["2nd", "ignored"])), Some(2));
        assert_eq!(parse_position(&strings(&["0"])), None);
        assert_eq!(parse_position(&strings(&["-3"])), None);
        assert_eq!(parse_position(&strings(&["two"])), None);
        assert_eq!(parse_position(&[]), None);
    }
}
