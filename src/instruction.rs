//! Recorded trip steps and their DSL serialization.
//!
//! An [`Instruction`] is the atomic unit of a trip's log. Serialization is a
//! pure function of the instruction: one template per [`Operation`], with a
//! placeholder default whenever the plain arguments are empty.
//!
//! | Operation | Template |
//! |-----------|----------|
//! | ACCORDING | `ACCORDING TO <args>` |
//! | ASSIGN    | first argument, verbatim |
//! | CLICK     | `CLICK ON <args>` |
//! | DIVE      | `DIVE INTO <args>` |
//! | ENTER     | `ENTER INTO <args>` |
//! | FROM      | `FROM <args>` |
//! | GROUP     | `GROUP BY <args>` |
//! | RUN       | `<args>` |
//! | SELECT    | `SELECT <args>, <selecting> AS <alias>, ...` |
//! | TARGET    | `TARGET <\| <args> \|` |
//! | WHEN      | `WHEN <condition> THEN <then> [ELSE <else>]` |
//! | WITH      | `WITH TIME <mode> <timestamp> [radius]` |
//! | DISTINCT  | `DISTINCT <args>` |
//!
//! Arguments are inserted as given. Nothing is escaped, so a selector that
//! contains `|>`, `<|` or `|` changes the shape of the program; quoting is
//! up to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{argument::SelectionPair, operation::Operation};

/// One recorded step of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub operation: Operation,

    /// Plain positional arguments; their meaning depends on the operation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Selections, only used by `SELECT`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliased_args: Vec<SelectionPair>,

    /// Condition expression, only used by `WHEN`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_args: Vec<String>,

    /// Compiled sub-program run when the condition holds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub then_flow: Vec<String>,

    /// Compiled sub-program run otherwise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub else_flow: Vec<String>,
}

impl Instruction {
    /// An instruction carrying plain arguments.
    pub fn new<I, S>(operation: Operation, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Instruction {
            operation,
            args: args.into_iter().map(Into::into).collect(),
            aliased_args: Vec::new(),
            conditional_args: Vec::new(),
            then_flow: Vec::new(),
            else_flow: Vec::new(),
        }
    }

    /// A `SELECT` over the given pairs.
    pub fn select(pairs: Vec<SelectionPair>) -> Self {
        Instruction {
            aliased_args: pairs,
            ..Instruction::new(Operation::Select, Vec::<String>::new())
        }
    }

    /// A `WHEN` over already compiled branches.
    pub fn when(condition: impl Into<String>, then_flow: String, else_flow: Option<String>) -> Self {
        Instruction {
            conditional_args: vec![condition.into()],
            then_flow: vec![then_flow],
            else_flow: else_flow.into_iter().collect(),
            ..Instruction::new(Operation::When, Vec::<String>::new())
        }
    }

    pub fn is_assigning(&self) -> bool {
        self.operation.is_assigning()
    }

    /// Serialize the instruction to its DSL fragment.
    pub fn to_dsl(&self) -> String {
        let keyword = self.operation.keyword();

        match self.operation {
            Operation::According => format!("{} TO {}", keyword, self.joined_args_or("yev/hn")),
            Operation::Assign => self.args.first().cloned().unwrap_or_default(),
            Operation::Click => format!("{} ON {}", keyword, self.joined_args_or("a")),
            Operation::Dive => format!("{} INTO {}", keyword, self.joined_args_or("invalid")),
            Operation::Enter => {
                format!("{} INTO {}", keyword, self.joined_args_or("input \"text\""))
            }
            Operation::From => format!("{} {}", keyword, self.joined_args_or("https://lsd.so")),
            Operation::Group => format!("{} BY {}", keyword, self.joined_args_or("div")),
            Operation::Run => self.args.join(" "),
            Operation::Select => {
                let columns: Vec<String> = self
                    .args
                    .iter()
                    .cloned()
                    .chain(self.aliased_args.iter().map(|pair| match &pair.alias {
                        Some(alias) => format!("{} AS {}", pair.selecting, alias),
                        None => pair.selecting.clone(),
                    }))
                    .collect();
                format!("{} {}", keyword, columns.join(", "))
            }
            Operation::Target => format!("{} <| {} |", keyword, self.joined_args_or("TRAVERSER")),
            Operation::When => {
                let condition = if self.conditional_args.is_empty() {
                    "1 = 1".to_string()
                } else {
                    self.conditional_args.join(" ")
                };

                let mut fragment = format!("{} {}", keyword, condition);
                if !self.then_flow.is_empty() {
                    fragment.push_str(" THEN ");
                    fragment.push_str(&self.then_flow.join(" "));
                }
                if !self.else_flow.is_empty() {
                    fragment.push_str(" ELSE ");
                    fragment.push_str(&self.else_flow.join(" "));
                }
                fragment
            }
            Operation::With => {
                if self.args.is_empty() {
                    String::new()
                } else {
                    format!("{} TIME {}", keyword, self.args.join(" "))
                }
            }
            Operation::Distinct => {
                if self.args.is_empty() {
                    keyword.to_string()
                } else {
                    format!("{} {}", keyword, self.args.join(" "))
                }
            }
        }
    }

    fn joined_args_or(&self, default: &str) -> String {
        if self.args.is_empty() {
            default.to_string()
        } else {
            self.args.join(" ")
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dsl())
    }
}
