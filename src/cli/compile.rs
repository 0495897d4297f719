//! Compile a JSON instruction log into a program

use super::CliError;
use crate::{Instruction, Placement, compile};

/// Parses `plan`, a JSON array of instructions, and compiles it as a
/// top-level program.
///
/// ```json
/// [
///   {"operation": "FROM", "args": ["https://news.ycombinator.com"]},
///   {"operation": "SELECT", "args": ["title"]}
/// ]
/// ```
pub fn compile_plan(plan: &str) -> Result<String, CliError> {
    if plan.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let instructions: Vec<Instruction> = serde_json::from_str(plan).map_err(CliError::Plan)?;
    Ok(compile(&instructions, Placement::TopLevel))
}
