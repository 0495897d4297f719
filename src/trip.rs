use std::{fmt, sync::Arc};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::{
    argument::Selection,
    compiler::{self, Placement},
    error::{Result, ValidationError},
    executor::{Executor, Row},
    instruction::Instruction,
    operation::{Operation, Target, TimeMode},
    schema::Schema,
};

/// A builder session: an ordered instruction log plus the executor that
/// will run it.
///
/// Every builder method consumes the trip, appends to its log and hands it
/// back, so a trip is only ever driven by one caller:
///
/// ```no_run
/// # use std::sync::Arc;
/// # use internetdata::{Executor, Schema, Trip};
/// # async fn front_page(executor: Arc<dyn Executor>) -> internetdata::Result<()> {
/// let schema = Schema::array(Schema::object([("post", Schema::string())]));
///
/// let posts = Trip::new(executor)
///     .navigate("https://news.ycombinator.com")
///     .group("span.titleline")
///     .select(("a", "post"))
///     .run(&schema)
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// Nothing is validated while building. An empty selector or a zero repeat
/// count is recorded as is and only the remote interpreter reports it.
#[derive(Clone)]
pub struct Trip {
    executor: Arc<dyn Executor>,
    instructions: Vec<Instruction>,
}

impl Trip {
    /// Creates an empty trip.
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self::with_instructions(executor, Vec::new())
    }

    /// Creates a trip seeded with an existing log.
    pub fn with_instructions(executor: Arc<dyn Executor>, instructions: Vec<Instruction>) -> Self {
        Trip {
            executor,
            instructions,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    fn push(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    /// A trip with the same executor and an empty log, for sub-programs.
    fn fresh(&self) -> Trip {
        Trip::new(Arc::clone(&self.executor))
    }

    /// Runs `body` against a fresh trip and compiles what it recorded as a
    /// nested sub-program.
    fn sub_program(&self, body: impl FnOnce(Trip) -> Trip) -> String {
        body(self.fresh()).compile_as(Placement::Nested)
    }

    // ------------------------------------------------------------------
    // Navigation and interaction
    // ------------------------------------------------------------------

    pub fn navigate(self, url: impl Into<String>) -> Self {
        self.push(Instruction::new(Operation::From, [url.into()]))
    }

    pub fn click(self, selector: impl Into<String>) -> Self {
        self.click_times(selector, 1)
    }

    /// Clicks `times` times in a row. Zero records nothing.
    pub fn click_times(mut self, selector: impl Into<String>, times: usize) -> Self {
        let selector = selector.into();
        for _ in 0..times {
            self = self.push(Instruction::new(Operation::Click, [selector.clone()]));
        }
        self
    }

    pub fn enter(self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(Instruction::new(Operation::Enter, [selector.into(), text.into()]))
    }

    /// Evaluates the rest of the trip against every item `target` refers
    /// to (typically a column of links) instead of the current page.
    pub fn dive(self, target: impl Into<String>) -> Self {
        self.push(Instruction::new(Operation::Dive, [target.into()]))
    }

    /// Replays a published skill.
    pub fn imitate(self, skill: impl Into<String>) -> Self {
        self.push(Instruction::new(Operation::According, [skill.into()]))
    }

    pub fn on(self, target: Target) -> Self {
        self.push(Instruction::new(Operation::Target, [target.as_str()]))
    }

    // ------------------------------------------------------------------
    // Extraction
    // ------------------------------------------------------------------

    /// Declares the repeating container; one output row per match.
    pub fn group(self, selector: impl Into<String>) -> Self {
        self.push(Instruction::new(Operation::Group, [selector.into()]))
    }

    /// Selects one column or a batch of columns with a single `SELECT`.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use internetdata::{Executor, Trip};
    /// # fn columns(executor: Arc<dyn Executor>) {
    /// let trip = Trip::new(executor)
    ///     .select("title")
    ///     .select(("a@href", "link"))
    ///     .select([("h1", "title"), ("p", "body")]);
    /// assert_eq!(trip.instructions().len(), 3);
    /// # }
    /// ```
    pub fn select(self, selection: impl Into<Selection>) -> Self {
        self.push(Instruction::select(selection.into().into_pairs()))
    }

    /// Keeps only the first row for every value of `column`.
    pub fn distinct(self, column: impl Into<String>) -> Self {
        self.push(Instruction::new(Operation::Distinct, [column.into()]))
    }

    // ------------------------------------------------------------------
    // Time windows
    // ------------------------------------------------------------------

    pub fn after(self, timestamp: impl Into<String>, radius: Option<&str>) -> Self {
        self.time_window(TimeMode::After, timestamp.into(), radius)
    }

    pub fn before(self, timestamp: impl Into<String>, radius: Option<&str>) -> Self {
        self.time_window(TimeMode::Before, timestamp.into(), radius)
    }

    /// `around("ANYTIME", None)` lifts any time restriction.
    pub fn around(self, timestamp: impl Into<String>, radius: Option<&str>) -> Self {
        self.time_window(TimeMode::Around, timestamp.into(), radius)
    }

    fn time_window(self, mode: TimeMode, timestamp: String, radius: Option<&str>) -> Self {
        let mut args = vec![mode.as_str().to_string(), timestamp];
        args.extend(radius.map(str::to_string));
        self.push(Instruction::new(Operation::With, args))
    }

    // ------------------------------------------------------------------
    // Bindings and control flow
    // ------------------------------------------------------------------

    /// Binds `name` to `value`, an expression in the DSL.
    pub fn assign(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let binding = format!("{} <| {} |", name.into(), value.into());
        self.push(Instruction::new(Operation::Assign, [binding]))
    }

    /// Defines a function without parameters.
    pub fn associate(self, name: impl Into<String>, body: impl FnOnce(Trip) -> Trip) -> Self {
        self.define(name, Vec::<String>::new(), body)
    }

    /// Defines a function whose body is the trip `body` builds.
    ///
    /// The body is recorded on its own trip, sharing nothing with this one
    /// but the executor, and compiled as a nested sub-program.
    pub fn define<I, P>(self, name: impl Into<String>, params: I, body: impl FnOnce(Trip) -> Trip) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let params: Vec<String> = params.into_iter().map(Into::into).collect();

        let mut definition = format!("{} <|> ", name.into());
        if !params.is_empty() {
            definition.push_str(&params.join(" "));
            definition.push_str(" <|");
        }
        definition.push_str(" \n");
        definition.push_str(&self.sub_program(body));
        definition.push_str(" |");

        self.push(Instruction::new(Operation::Assign, [definition]))
    }

    /// Invokes a function defined with [`define`](Self::define) or
    /// [`associate`](Self::associate).
    pub fn apply(self, name: impl Into<String>) -> Self {
        self.apply_with(name, Vec::<String>::new())
    }

    pub fn apply_with<I, A>(self, name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let mut call: Vec<String> = vec![name.into()];
        call.extend(args.into_iter().map(Into::into));
        self.push(Instruction::new(Operation::Run, call))
    }

    /// Runs the trip `then` builds when `condition` holds.
    pub fn when(self, condition: impl Into<String>, then: impl FnOnce(Trip) -> Trip) -> Self {
        let then_flow = self.sub_program(then);
        self.push(Instruction::when(condition, then_flow, None))
    }

    /// Runs `then` when `condition` holds and `otherwise` when it does not.
    pub fn when_else(
        self,
        condition: impl Into<String>,
        then: impl FnOnce(Trip) -> Trip,
        otherwise: impl FnOnce(Trip) -> Trip,
    ) -> Self {
        let then_flow = self.sub_program(then);
        let else_flow = self.sub_program(otherwise);
        self.push(Instruction::when(condition, then_flow, Some(else_flow)))
    }

    // ------------------------------------------------------------------
    // Compilation and execution
    // ------------------------------------------------------------------

    /// Compiles the log into a standalone program.
    ///
    /// Pure and repeatable: the same log always yields the same text.
    pub fn compile(&self) -> String {
        self.compile_as(Placement::TopLevel)
    }

    fn compile_as(&self, placement: Placement) -> String {
        compiler::compile(&self.instructions, placement)
    }

    /// Sends arbitrary DSL text to the executor, without validation.
    pub async fn execute(&self, query: &str) -> Result<Vec<Row>> {
        info!(bytes = query.len(), "dispatching query");
        let rows = self.executor.execute(query).await?;
        info!(rows = rows.len(), "query returned");
        Ok(rows)
    }

    /// Compiles the trip, runs it and validates the rows against `schema`.
    ///
    /// The rows are validated as one JSON array, so `schema` is normally an
    /// [`Schema::array`] of [`Schema::object`]s. The cast value is returned.
    pub async fn run(&self, schema: &Schema) -> Result<Value> {
        let program = self.compile();
        let rows = self.execute(&program).await?;
        let rows = Value::Array(rows.into_iter().map(Value::Object).collect());
        Ok(schema.validate(&rows)?)
    }

    /// Like [`run`](Self::run), then deserializes the cast rows into `T`.
    pub async fn extrapolate<T: DeserializeOwned>(&self, schema: &Schema) -> Result<T> {
        let validated = self.run(schema).await?;
        serde_json::from_value(validated).map_err(|e| {
            ValidationError {
                path: "$".to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: e.to_string(),
            }
            .into()
        })
    }
}

impl fmt::Debug for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trip")
            .field("instructions", &self.instructions)
            .finish_non_exhaustive()
    }
}
