use std::sync::Arc;

use async_trait::async_trait;
use internetdata::{Executor, Instruction, Operation, Placement, Row, Target, Trip, compile};

struct Offline;

#[async_trait]
impl Executor for Offline {
    async fn execute(&self, _query: &str) -> internetdata::Result<Vec<Row>> {
        Ok(Vec::new())
    }
}

fn trip() -> Trip {
    Trip::new(Arc::new(Offline))
}

// ============================================================================
// Flow
// ============================================================================

#[test]
fn test_empty_trip_compiles_to_empty_program() {
    assert_eq!(trip().compile(), "");
}

#[test]
fn test_flow_is_joined_with_pipes() {
    let program = trip()
        .navigate("https://news.ycombinator.com")
        .group("span.titleline")
        .select(("a", "post"))
        .compile();

    assert_eq!(
        program,
        "FROM https://news.ycombinator.com |> GROUP BY span.titleline |> SELECT a AS post"
    );
}

#[test]
fn test_compile_is_repeatable() {
    let trip = trip().navigate("https://lsd.so").click("#go").select("title");
    assert_eq!(trip.compile(), trip.compile());
}

#[test]
fn test_click_times_repeats_the_click() {
    let program = trip().click_times("a.morelink", 3).compile();
    assert_eq!(
        program,
        "CLICK ON a.morelink |> CLICK ON a.morelink |> CLICK ON a.morelink"
    );
}

#[test]
fn test_click_zero_times_records_nothing() {
    let trip = trip().click_times("a.morelink", 0);
    assert!(trip.instructions().is_empty());
    assert_eq!(trip.compile(), "");
}

#[test]
fn test_enter_and_dive() {
    let program = trip()
        .enter("input[name=q]", "rust")
        .dive("post_link")
        .compile();
    assert_eq!(program, "ENTER INTO input[name=q] rust |> DIVE INTO post_link");
}

#[test]
fn test_imitate_and_distinct() {
    let program = trip().imitate("yev/hacker_news").distinct("link").compile();
    assert_eq!(program, "ACCORDING TO yev/hacker_news |> DISTINCT link");
}

#[test]
fn test_apply_emits_bare_call() {
    assert_eq!(trip().apply("paginate").compile(), "paginate");
    assert_eq!(trip().apply_with("paginate", ["3", "next"]).compile(), "paginate 3 next");
}

// ============================================================================
// Selections
// ============================================================================

#[test]
fn test_batch_select_is_one_instruction() {
    let trip = trip().select([("h1", "title"), ("p", "body")]);

    assert_eq!(trip.instructions().len(), 1);
    assert_eq!(trip.compile(), "SELECT h1 AS title, p AS body");
}

#[test]
fn test_bare_select() {
    assert_eq!(trip().select("title").compile(), "SELECT title");
}

#[test]
fn test_separate_selects_stay_separate() {
    let program = trip().select("h1").select(("p", "body")).compile();
    assert_eq!(program, "SELECT h1 |> SELECT p AS body");
}

// ============================================================================
// Time Windows
// ============================================================================

#[test]
fn test_time_windows() {
    assert_eq!(trip().after("2024-01-01", None).compile(), "WITH TIME AFTER 2024-01-01");
    assert_eq!(trip().before("2024-01-01", None).compile(), "WITH TIME BEFORE 2024-01-01");
    assert_eq!(
        trip().around("2024-01-01", Some("7d")).compile(),
        "WITH TIME AROUND 2024-01-01 7d"
    );
    assert_eq!(trip().around("ANYTIME", None).compile(), "WITH TIME AROUND ANYTIME");
}

// ============================================================================
// Hoisting
// ============================================================================

#[test]
fn test_assignment_is_hoisted_above_flow() {
    let program = trip().navigate("x").assign("a", "1").compile();
    assert_eq!(program, "a <| 1 |\nFROM x");
}

#[test]
fn test_hoisting_keeps_relative_order() {
    let program = trip()
        .navigate("https://lsd.so")
        .assign("first", "1")
        .click("#go")
        .on(Target::Browser)
        .assign("second", "2")
        .select("title")
        .compile();

    assert_eq!(
        program,
        "first <| 1 |\nTARGET <| BROWSER |\nsecond <| 2 |\nFROM https://lsd.so |> CLICK ON #go |> SELECT title"
    );
}

#[test]
fn test_assignment_only_program_has_no_trailing_newline() {
    assert_eq!(trip().on(Target::Traverser).compile(), "TARGET <| TRAVERSER |");
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_associate_without_params() {
    let program = trip().associate("f", |t| t.click("#x")).compile();
    assert_eq!(program, "f <|>  \n|> CLICK ON #x |");
}

#[test]
fn test_define_with_params() {
    let program = trip()
        .define("paginate", ["n"], |t| t.click("a.next").select("title"))
        .compile();
    assert_eq!(
        program,
        "paginate <|> n <| \n|> CLICK ON a.next |> SELECT title |"
    );
}

#[test]
fn test_definition_body_does_not_leak_into_caller() {
    let trip = trip()
        .navigate("https://lsd.so")
        .associate("f", |t| t.click("#x"))
        .apply("f");

    assert_eq!(trip.instructions().len(), 3);
    assert_eq!(
        trip.compile(),
        "f <|>  \n|> CLICK ON #x |\nFROM https://lsd.so |> f"
    );
}

#[test]
fn test_nested_body_hoists_its_own_assignments() {
    let program = trip()
        .associate("f", |t| t.click("#x").assign("y", "2"))
        .compile();
    assert_eq!(program, "f <|>  \ny <| 2 |\n|> CLICK ON #x |");
}

// ============================================================================
// Conditionals
// ============================================================================

#[test]
fn test_when_without_else() {
    let program = trip().when("n > 0", |t| t.click("#next")).compile();
    assert_eq!(program, "WHEN n > 0 THEN |> CLICK ON #next");
}

#[test]
fn test_when_else() {
    let program = trip()
        .when_else(
            "n > 0",
            |t| t.click("#next").select("title"),
            |t| t.navigate("https://lsd.so"),
        )
        .compile();
    assert_eq!(
        program,
        "WHEN n > 0 THEN |> CLICK ON #next |> SELECT title ELSE |> FROM https://lsd.so"
    );
}

#[test]
fn test_when_inside_flow() {
    let program = trip()
        .navigate("https://lsd.so")
        .when("1 = 1", |t| t.click("#more"))
        .select("title")
        .compile();
    assert_eq!(
        program,
        "FROM https://lsd.so |> WHEN 1 = 1 THEN |> CLICK ON #more |> SELECT title"
    );
}

#[test]
fn test_when_defaults_condition() {
    let instruction = Instruction {
        conditional_args: Vec::new(),
        ..Instruction::when("ignored", "|> CLICK ON a".to_string(), None)
    };
    assert_eq!(instruction.to_dsl(), "WHEN 1 = 1 THEN |> CLICK ON a");
}

// ============================================================================
// Compiler
// ============================================================================

#[test]
fn test_nested_placement_prefixes_every_fragment() {
    let log = vec![
        Instruction::new(Operation::Click, ["#a"]),
        Instruction::new(Operation::Select, ["title"]),
    ];

    assert_eq!(compile(&log, Placement::TopLevel), "CLICK ON #a |> SELECT title");
    assert_eq!(compile(&log, Placement::Nested), "|> CLICK ON #a |> SELECT title");
}

#[test]
fn test_seeded_trip_compiles_its_log() {
    let log = vec![
        Instruction::new(Operation::From, ["https://lsd.so"]),
        Instruction::new(Operation::Assign, ["a <| 1 |"]),
    ];
    let trip = Trip::with_instructions(Arc::new(Offline), log);
    assert_eq!(trip.compile(), "a <| 1 |\nFROM https://lsd.so");
}

#[test]
fn test_caselaw_pagination() {
    let program = trip()
        .assign("next_button", "li.pagination-next a")
        .navigate("https://caselaw.findlaw.com/court/us-supreme-court")
        .define("paginate", ["n"], |t| {
            t.when("n > 0", |t| t.click("next_button").apply_with("paginate", ["n - 1"]))
        })
        .apply_with("paginate", ["3"])
        .group("tr")
        .select([("td a", "case"), ("td a@href", "link")])
        .compile();

    assert_eq!(
        program,
        "next_button <| li.pagination-next a |\n\
         paginate <|> n <| \n|> WHEN n > 0 THEN |> CLICK ON next_button |> paginate n - 1 |\n\
         FROM https://caselaw.findlaw.com/court/us-supreme-court |> paginate 3 |> GROUP BY tr |> SELECT td a AS case, td a@href AS link"
    );
}
