//! `todo`: manage a todo list from the terminal.
//!
//! ```text
//! todo add Buy milk
//! todo list
//! todo done 1
//! todo remove 1
//! todo clear
//! ```
//!
//! The list lives in `todos.json` in the working directory unless `--file`
//! or `TODO_FILE` says otherwise. `RUST_LOG` enables diagnostics on stderr.

use clap::Parser;
use clap::error::ErrorKind;
use std::io::Write;
use std::sync::Arc;
use tasklist_cli::{Cli, run, write_help};
use tasklist_core::environment::SystemClock;
use tasklist_core::{FileStorage, TodoEnvironment, TodoService};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", error.render())?;
            return Ok(());
        }
        Err(error) => {
            tracing::debug!(%error, "unrecognized arguments");
            return write_help(&mut out);
        }
    };

    tracing::debug!(file = %cli.file.display(), "using todo file");
    let service = TodoService::new(
        Arc::new(FileStorage::new(&cli.file)),
        TodoEnvironment::new(Arc::new(SystemClock)),
    );

    run(cli.command, &service, &mut out)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
