//! Run raw programs against an executor

use std::sync::Arc;

use serde_json::Value;

use super::CliError;
use crate::{Executor, Row, Trip};

/// Options for the execute command
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// The program to run
    pub query: String,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Sends the program to `executor` unchanged and renders the rows as JSON.
pub async fn execute_query(executor: Arc<dyn Executor>, options: &ExecuteOptions) -> Result<String, CliError> {
    let query = options.query.trim();
    if query.is_empty() {
        return Err(CliError::NoInput);
    }

    let rows = Trip::new(executor).execute(query).await?;
    render_rows(rows, options.pretty)
}

pub fn render_rows(rows: Vec<Row>, pretty: bool) -> Result<String, CliError> {
    let rows = Value::Array(rows.into_iter().map(Value::Object).collect());
    let json = if pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };
    Ok(json)
}
