//! Declarative row schemas.
//!
//! A [`Schema`] describes the shape a trip's rows must have and casts them
//! into it. The rows returned by an executor arrive as one JSON array, so
//! the usual schema is an array of objects:
//!
//! ```
//! use internetdata::Schema;
//!
//! let schema = Schema::array(Schema::object([
//!     ("post", Schema::string()),
//!     ("views", Schema::number().numeric()),
//! ]));
//! ```
//!
//! Validation stops at the first mismatch and reports where it happened,
//! what was expected and what was found. Nothing is silently dropped or
//! coerced, except that object keys the schema does not mention are left
//! out of the cast value, numbers declared [`numeric`](Schema::numeric)
//! accept numeric strings, and [`integer`](Schema::integer) casts whole
//! floats such as `3.0`.

use std::{fmt, str::FromStr};

use regex::Regex;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::{Map, Number, Value};

use crate::error::ValidationError;

/// Shape of a JSON value.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Anything, passed through untouched
    Any,

    /// A string, optionally matching a pattern
    String { pattern: Option<Regex> },

    /// A number. `numeric` also accepts strings holding a number; `integer`
    /// rejects fractional values.
    Number { numeric: bool, integer: bool },

    Boolean,

    /// An array whose every element matches the item schema
    Array(Box<Schema>),

    /// An object with the listed fields, in declaration order
    Object(Vec<(String, Schema)>),

    /// A field that may be absent
    Optional(Box<Schema>),

    /// A value that may be `null`
    Nullable(Box<Schema>),
}

impl Schema {
    pub fn any() -> Self {
        Schema::Any
    }

    pub fn string() -> Self {
        Schema::String { pattern: None }
    }

    /// A string that must match `pattern`.
    pub fn matching(pattern: Regex) -> Self {
        Schema::String {
            pattern: Some(pattern),
        }
    }

    pub fn number() -> Self {
        Schema::Number {
            numeric: false,
            integer: false,
        }
    }

    /// A whole number. Floats with no fractional part, such as `3.0`, are
    /// accepted and cast to integers.
    pub fn integer() -> Self {
        Schema::Number {
            numeric: false,
            integer: true,
        }
    }

    pub fn boolean() -> Self {
        Schema::Boolean
    }

    pub fn array(item: Schema) -> Self {
        Schema::Array(Box::new(item))
    }

    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Schema::Object(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }

    pub fn optional(self) -> Self {
        Schema::Optional(Box::new(self))
    }

    pub fn nullable(self) -> Self {
        Schema::Nullable(Box::new(self))
    }

    /// Let a number schema accept strings such as `"1204"` or `"3.5"`,
    /// casting them to numbers. Other schemas are unchanged.
    pub fn numeric(self) -> Self {
        match self {
            Schema::Number { integer, .. } => Schema::Number {
                numeric: true,
                integer,
            },
            other => other,
        }
    }

    /// Check `value` against the schema and return the cast value.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        let mut path = Vec::new();
        self.check(value, &mut path)
    }

    fn expected(&self) -> String {
        match self {
            Schema::Any => "any value".to_string(),
            Schema::String { pattern: Some(re) } => format!("string matching /{}/", re.as_str()),
            Schema::String { pattern: None } => "string".to_string(),
            Schema::Number { numeric: true, integer: true } => "integer or integer string".to_string(),
            Schema::Number { numeric: true, integer: false } => "number or numeric string".to_string(),
            Schema::Number { integer: true, .. } => "integer".to_string(),
            Schema::Number { .. } => "number".to_string(),
            Schema::Boolean => "boolean".to_string(),
            Schema::Array(_) => "array".to_string(),
            Schema::Object(_) => "object".to_string(),
            Schema::Optional(inner) => inner.expected(),
            Schema::Nullable(inner) => format!("{} or null", inner.expected()),
        }
    }

    fn check(&self, value: &Value, path: &mut Vec<PathSegment>) -> Result<Value, ValidationError> {
        match (self, value) {
            (Schema::Any, _) => Ok(value.clone()),

            (Schema::Optional(inner), _) => inner.check(value, path),

            (Schema::Nullable(_), Value::Null) => Ok(Value::Null),
            (Schema::Nullable(inner), _) => inner.check(value, path),

            (Schema::String { pattern }, Value::String(s)) => match pattern {
                Some(re) if !re.is_match(s) => Err(self.mismatch(path, format!("{:?}", s))),
                _ => Ok(value.clone()),
            },

            (Schema::Number { integer: true, .. }, Value::Number(n)) if n.is_f64() => {
                match n.as_f64().filter(|f| f.fract() == 0.0) {
                    Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(Value::from(f as i64)),
                    Some(_) => Ok(value.clone()),
                    None => Err(self.mismatch(path, format!("number {}", n))),
                }
            }
            (Schema::Number { .. }, Value::Number(_)) => Ok(value.clone()),
            (Schema::Number { numeric: true, integer }, Value::String(s)) => {
                parse_numeric(s, *integer)
                    .map(Value::Number)
                    .ok_or_else(|| self.mismatch(path, format!("string {:?}", s)))
            }

            (Schema::Boolean, Value::Bool(_)) => Ok(value.clone()),

            (Schema::Array(item), Value::Array(elements)) => {
                let mut cast = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    path.push(PathSegment::Index(index));
                    cast.push(item.check(element, path)?);
                    path.pop();
                }
                Ok(Value::Array(cast))
            }

            (Schema::Object(fields), Value::Object(map)) => {
                let mut cast = Map::new();
                for (name, field) in fields {
                    path.push(PathSegment::Field(name.clone()));
                    match map.get(name) {
                        Some(found) => {
                            cast.insert(name.clone(), field.check(found, path)?);
                        }
                        None if field.accepts_missing() => {}
                        None => return Err(field.mismatch(path, "missing".to_string())),
                    }
                    path.pop();
                }
                Ok(Value::Object(cast))
            }

            _ => Err(self.mismatch(path, type_name(value).to_string())),
        }
    }

    /// Whether an object field with this schema may be absent, looking
    /// through any wrapper order.
    fn accepts_missing(&self) -> bool {
        match self {
            Schema::Optional(_) => true,
            Schema::Nullable(inner) => inner.accepts_missing(),
            _ => false,
        }
    }

    fn mismatch(&self, path: &[PathSegment], actual: String) -> ValidationError {
        ValidationError {
            path: render_path(path),
            expected: self.expected(),
            actual,
        }
    }
}

/// Parse a numeric string into a JSON number without going through `f64`
/// for whole numbers.
fn parse_numeric(s: &str, integer: bool) -> Option<Number> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_number(decimal, integer)
}

/// Whole numbers stay integral while they fit `i64` or `u64`. Past that,
/// integer mode rejects them and number mode falls back to `f64`.
pub(crate) fn decimal_to_number(decimal: Decimal, integer: bool) -> Option<Number> {
    if decimal.fract().is_zero() {
        if let Some(n) = decimal.to_i64() {
            return Some(Number::from(n));
        }
        if let Some(n) = decimal.to_u64() {
            return Some(Number::from(n));
        }
    }
    if integer {
        return None;
    }
    decimal.to_f64().and_then(Number::from_f64)
}

#[derive(Debug, Clone, PartialEq)]
enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

fn render_path(path: &[PathSegment]) -> String {
    let mut rendered = String::from("$");
    for segment in path {
        rendered.push_str(&segment.to_string());
    }
    rendered
}

/// Returns a human-readable type name for a JSON value
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
