use serde::{Deserialize, Serialize};

/// One extraction: a selector or expression, and the column name it is
/// exposed under.
///
/// Without an alias the selector itself names the column, which is how
/// labels such as `title`, `MARKDOWN` or `FILE` are requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPair {
    pub selecting: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl SelectionPair {
    /// A selection exposed under its own name.
    pub fn bare(selecting: impl Into<String>) -> Self {
        SelectionPair {
            selecting: selecting.into(),
            alias: None,
        }
    }

    /// A selection exposed under `alias`.
    pub fn aliased(selecting: impl Into<String>, alias: impl Into<String>) -> Self {
        SelectionPair {
            selecting: selecting.into(),
            alias: Some(alias.into()),
        }
    }
}

/// Argument of [`Trip::select`](crate::Trip::select).
///
/// Both forms end up in the aliased arguments of a single `SELECT`
/// instruction; a batch keeps the iteration order it was given in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(SelectionPair),
    Batch(Vec<SelectionPair>),
}

impl Selection {
    pub fn into_pairs(self) -> Vec<SelectionPair> {
        match self {
            Selection::Single(pair) => vec![pair],
            Selection::Batch(pairs) => pairs,
        }
    }
}

impl From<SelectionPair> for Selection {
    fn from(pair: SelectionPair) -> Self {
        Selection::Single(pair)
    }
}

impl From<&str> for Selection {
    fn from(selecting: &str) -> Self {
        Selection::Single(SelectionPair::bare(selecting))
    }
}

impl From<String> for Selection {
    fn from(selecting: String) -> Self {
        Selection::Single(SelectionPair::bare(selecting))
    }
}

impl<S: Into<String>, A: Into<String>> From<(S, A)> for Selection {
    fn from((selecting, alias): (S, A)) -> Self {
        Selection::Single(SelectionPair::aliased(selecting, alias))
    }
}

impl<S: Into<String>, A: Into<String>, const N: usize> From<[(S, A); N]> for Selection {
    fn from(pairs: [(S, A); N]) -> Self {
        Selection::Batch(
            pairs
                .into_iter()
                .map(|(selecting, alias)| SelectionPair::aliased(selecting, alias))
                .collect(),
        )
    }
}

impl<S: Into<String>, A: Into<String>> From<Vec<(S, A)>> for Selection {
    fn from(pairs: Vec<(S, A)>) -> Self {
        Selection::Batch(
            pairs
                .into_iter()
                .map(|(selecting, alias)| SelectionPair::aliased(selecting, alias))
                .collect(),
        )
    }
}

impl From<Vec<SelectionPair>> for Selection {
    fn from(pairs: Vec<SelectionPair>) -> Self {
        Selection::Batch(pairs)
    }
}
