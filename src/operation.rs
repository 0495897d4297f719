use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of instruction kinds a trip can record.
///
/// Every variant is named after the keyword it contributes to the compiled
/// program, and every variant has exactly one serialization template (see
/// [`Instruction::to_dsl`](crate::Instruction::to_dsl)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Imitate a published skill
    ///
    /// # Example
    /// ```text
    /// ACCORDING TO yev/hacker_news
    /// ```
    According,

    /// Binding of a variable or a function; already formatted by the builder
    ///
    /// # Example
    /// ```text
    /// next_button <| li.pagination-next a |
    /// ```
    Assign,

    /// Click on an element
    ///
    /// # Example
    /// ```text
    /// CLICK ON #download
    /// ```
    Click,

    /// Evaluate the rest of the program against each item a column links to
    ///
    /// # Example
    /// ```text
    /// DIVE INTO post_link
    /// ```
    Dive,

    /// Type text into an input
    ///
    /// # Example
    /// ```text
    /// ENTER INTO input[name="q"] "rust"
    /// ```
    Enter,

    /// Navigate to a page
    ///
    /// # Example
    /// ```text
    /// FROM https://news.ycombinator.com
    /// ```
    From,

    /// Repeating container; one output row per match
    ///
    /// # Example
    /// ```text
    /// GROUP BY span.titleline
    /// ```
    Group,

    /// Invoke a previously defined function
    Run,

    /// Extraction of one or more columns
    ///
    /// # Example
    /// ```text
    /// SELECT h1 AS title, p AS body
    /// ```
    Select,

    /// Where the trip executes
    ///
    /// # Example
    /// ```text
    /// TARGET <| BROWSER |
    /// ```
    Target,

    /// Conditional branch over two sub-programs
    ///
    /// # Example
    /// ```text
    /// WHEN n > 0 THEN |> CLICK ON #next
    /// ```
    When,

    /// Time-window filter
    ///
    /// # Example
    /// ```text
    /// WITH TIME AROUND ANYTIME
    /// ```
    With,

    /// Deduplicate results on a column
    ///
    /// # Example
    /// ```text
    /// DISTINCT link
    /// ```
    Distinct,
}

impl Operation {
    /// Every operation, in keyword order.
    pub const ALL: [Operation; 13] = [
        Operation::According,
        Operation::Assign,
        Operation::Click,
        Operation::Dive,
        Operation::Enter,
        Operation::From,
        Operation::Group,
        Operation::Run,
        Operation::Select,
        Operation::Target,
        Operation::When,
        Operation::With,
        Operation::Distinct,
    ];

    /// Canonical uppercase keyword of the operation.
    pub fn keyword(self) -> &'static str {
        match self {
            Operation::According => "ACCORDING",
            Operation::Assign => "ASSIGN",
            Operation::Click => "CLICK",
            Operation::Dive => "DIVE",
            Operation::Enter => "ENTER",
            Operation::From => "FROM",
            Operation::Group => "GROUP",
            Operation::Run => "RUN",
            Operation::Select => "SELECT",
            Operation::Target => "TARGET",
            Operation::When => "WHEN",
            Operation::With => "WITH",
            Operation::Distinct => "DISTINCT",
        }
    }

    /// Assigning operations declare bindings and are hoisted ahead of the
    /// flow when a trip is compiled.
    pub fn is_assigning(self) -> bool {
        matches!(self, Operation::Assign | Operation::Target)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.keyword() == upper)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

/// Where a trip is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A real browser session
    Browser,
    /// The headless traverser
    Traverser,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Browser => "BROWSER",
            Target::Traverser => "TRAVERSER",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BROWSER" => Ok(Target::Browser),
            "TRAVERSER" => Ok(Target::Traverser),
            _ => Err(format!("unknown target '{}' (expected BROWSER or TRAVERSER)", s)),
        }
    }
}

/// Direction of a `WITH TIME` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    After,
    Before,
    Around,
}

impl TimeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeMode::After => "AFTER",
            TimeMode::Before => "BEFORE",
            TimeMode::Around => "AROUND",
        }
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[test]
fn test_keywords_round_trip_through_from_str() {
    for op in Operation::ALL {
        assert_eq!(op.keyword().parse::<Operation>(), Ok(op));
    }
    assert_eq!("according".parse::<Operation>(), Ok(Operation::According));
    assert!("NAVIGATE".parse::<Operation>().is_err());
}

#[test]
fn test_only_assign_and_target_are_assigning() {
    let assigning: Vec<Operation> = Operation::ALL
        .into_iter()
        .filter(|op| op.is_assigning())
        .collect();
    assert_eq!(assigning, vec![Operation::Assign, Operation::Target]);
}
