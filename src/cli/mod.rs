//! CLI support for the `lsd` binary
//!
//! Each subcommand is a plain function over strings and executors so it can
//! be driven from tests or embedded in other tools.

mod compile;
mod docs;
mod execute;

pub use compile::compile_plan;
pub use docs::{get_docs_overview, get_operation_doc};
pub use execute::{ExecuteOptions, execute_query, render_rows};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid plan: {0}")]
    Plan(serde_json::Error),

    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Trip(#[from] crate::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no input provided, pass it as an argument or pipe it to stdin")]
    NoInput,

    #[error("unknown operation: '{0}'\nRun 'lsd docs' to see available operations.")]
    UnknownOperation(String),
}
