//! Assembly of an instruction log into one DSL program.
//!
//! A program is an assignment block followed by a flow block:
//!
//! ```text
//! next_button <| li.pagination-next a |
//! TARGET <| BROWSER |
//! FROM https://lsd.so |> GROUP BY li |> SELECT a AS link
//! ```
//!
//! Assigning instructions are hoisted ahead of the flow no matter where they
//! were recorded, because the remote interpreter needs bindings to exist
//! before their first use. Within each block the recorded order is kept.

use tracing::debug;

use crate::instruction::Instruction;

const PIPE: &str = "|>";

/// Where a compiled program is going to be spliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A standalone program handed to the executor
    TopLevel,
    /// A sub-program spliced after an already open pipeline, such as a
    /// `WHEN` branch or a function body. Every flow fragment, the first one
    /// included, is prefixed with the pipe operator.
    Nested,
}

/// Compile `instructions` into DSL text.
pub fn compile(instructions: &[Instruction], placement: Placement) -> String {
    let (assigning, flow): (Vec<&Instruction>, Vec<&Instruction>) =
        instructions.iter().partition(|i| i.is_assigning());

    let assignments = assigning
        .iter()
        .map(|i| i.to_dsl())
        .collect::<Vec<_>>()
        .join("\n");

    let fragments = flow.iter().map(|i| i.to_dsl());
    let pipeline = match placement {
        Placement::TopLevel => fragments.collect::<Vec<_>>().join(&format!(" {} ", PIPE)),
        Placement::Nested => fragments
            .map(|fragment| format!("{} {}", PIPE, fragment))
            .collect::<Vec<_>>()
            .join(" "),
    };

    let program = format!("{}\n{}", assignments, pipeline).trim().to_string();

    debug!(
        assigning = assigning.len(),
        flow = flow.len(),
        ?placement,
        program = %program,
        "compiled trip"
    );

    program
}
