#![cfg(feature = "cli")]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use internetdata::cli::{CliError, ExecuteOptions, compile_plan, execute_query, get_docs_overview, get_operation_doc};
use internetdata::{Executor, Operation, Row};
use serde_json::json;

struct Echo {
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl Executor for Echo {
    async fn execute(&self, query: &str) -> internetdata::Result<Vec<Row>> {
        self.queries.lock().unwrap().push(query.to_string());
        let mut row = Row::new();
        row.insert("query".to_string(), json!(query));
        Ok(vec![row])
    }
}

// ============================================================================
// Compile
// ============================================================================

#[test]
fn test_compile_plan() {
    let plan = r#"[
        {"operation": "FROM", "args": ["https://news.ycombinator.com"]},
        {"operation": "ASSIGN", "args": ["x <| 1 |"]},
        {"operation": "SELECT", "aliased_args": [{"selecting": "a", "alias": "post"}, {"selecting": "title"}]}
    ]"#;

    assert_eq!(
        compile_plan(plan).unwrap(),
        "x <| 1 |\nFROM https://news.ycombinator.com |> SELECT a AS post, title"
    );
}

#[test]
fn test_compile_plan_rejects_unknown_operation() {
    let err = compile_plan(r#"[{"operation": "NAVIGATE"}]"#).unwrap_err();
    assert!(matches!(err, CliError::Plan(_)));
}

#[test]
fn test_compile_plan_requires_input() {
    assert!(matches!(compile_plan("  \n"), Err(CliError::NoInput)));
}

// ============================================================================
// Execute
// ============================================================================

#[tokio::test]
async fn test_execute_query_renders_rows() {
    let executor = Arc::new(Echo {
        queries: Mutex::new(Vec::new()),
    });
    let options = ExecuteOptions {
        query: "FROM https://lsd.so |> SELECT title\n".to_string(),
        pretty: false,
    };

    let output = execute_query(executor.clone(), &options).await.unwrap();

    assert_eq!(output, r#"[{"query":"FROM https://lsd.so |> SELECT title"}]"#);
    assert_eq!(executor.queries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_execute_query_requires_input() {
    let executor = Arc::new(Echo {
        queries: Mutex::new(Vec::new()),
    });
    let err = execute_query(executor, &ExecuteOptions::default()).await.unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

// ============================================================================
// Docs
// ============================================================================

#[test]
fn test_every_operation_is_documented() {
    let overview = get_docs_overview();
    for op in Operation::ALL {
        let name = op.keyword().to_lowercase();
        assert!(overview.contains(&name), "overview is missing {}", name);
        assert!(get_operation_doc(&name).unwrap().starts_with(op.keyword()));
    }
}

#[test]
fn test_unknown_operation_doc() {
    let err = get_operation_doc("teleport").unwrap_err();
    assert!(err.to_string().contains("teleport"));
}
