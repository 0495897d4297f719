use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;

/// One result row: column name to value.
pub type Row = Map<String, Value>;

/// Anything that can run a compiled program and hand back its rows.
///
/// A trip only ever holds this capability; acquiring, pooling and
/// re-acquiring the underlying connection is the implementor's business.
/// At most one outstanding call per handle is assumed.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, query: &str) -> Result<Vec<Row>>;
}
