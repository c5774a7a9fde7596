//! Condition evaluation against in-memory records.
//!
//! This is the reference consumer of a compiled [`Condition`]: it gives every
//! literal the meaning a relational backend would, so the same tree can be
//! checked without a database.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use listing_query_rs::config::ListingConfig;
//! use listing_query_rs::filter::{ConditionEvaluator, TreeBuilder, Value};
//! use listing_query_rs::schema::{AttributeSpec, EntitySchema, SemanticType};
//!
//! let schema = EntitySchema::new()
//!     .with_attribute("age", AttributeSpec::new(SemanticType::Integer));
//! let config = ListingConfig::default();
//! let builder = TreeBuilder::new(&schema, &config);
//!
//! let filters = BTreeMap::from([("age".to_string(), ">30".to_string())]);
//! let condition = builder.build_from_map(&filters).unwrap();
//!
//! let record = BTreeMap::from([("age".to_string(), Value::Integer(42))]);
//! assert!(ConditionEvaluator::new(&condition).matches(&record));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::ast::Mode;
use super::builder::Condition;
use super::literal::{Bound, NumberValue, TypedLiteral};

/// An attribute value read from a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns true for a missing value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Textual form used by string and enum comparisons.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// The value as an integer, parsing text if needed.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The value as a float, parsing text if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(s) => s.trim().parse().ok().filter(|v: &f64| v.is_finite()),
            _ => None,
        }
    }

    /// The value as a boolean, accepting `true`/`false` text.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// The value as a date/time; dates map to midnight.
    ///
    /// Text is accepted as RFC 3339, ISO date/time, or ISO date.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Value::Text(s) => parse_datetime_text(s.trim()),
            _ => None,
        }
    }

    /// Orders two values of compatible kinds.
    ///
    /// Numbers compare numerically, dates chronologically, everything else
    /// by textual form. Returns `None` if either side is null.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => None,
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Date(_) | Value::DateTime(_), Value::Date(_) | Value::DateTime(_)) => {
                Some(self.as_datetime()?.cmp(&other.as_datetime()?))
            }
            _ => Some(self.to_text()?.cmp(&other.to_text()?)),
        }
    }
}

fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }
}

/// Anything a condition can be evaluated against.
pub trait Record {
    /// Returns the value of `attribute`, or [`Value::Null`] if absent.
    fn value(&self, attribute: &str) -> Value;
}

impl Record for BTreeMap<String, Value> {
    fn value(&self, attribute: &str) -> Value {
        self.get(attribute).cloned().unwrap_or(Value::Null)
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn value(&self, attribute: &str) -> Value {
        self.get(attribute).map_or(Value::Null, Value::from)
    }
}

impl Record for serde_json::Value {
    fn value(&self, attribute: &str) -> Value {
        match self {
            serde_json::Value::Object(map) => map.value(attribute),
            _ => Value::Null,
        }
    }
}

/// Evaluates a compiled condition against records.
#[derive(Debug, Clone, Copy)]
pub struct ConditionEvaluator<'a> {
    condition: &'a Condition,
}

impl<'a> ConditionEvaluator<'a> {
    /// Creates a new evaluator.
    pub fn new(condition: &'a Condition) -> Self {
        Self { condition }
    }

    /// Returns true if the record matches the condition.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        evaluate(self.condition, record)
    }

    /// Filters a slice of records, returning only those that match.
    pub fn filter_records<'b, R: Record>(&self, records: &'b [R]) -> Vec<&'b R> {
        records.iter().filter(|record| self.matches(*record)).collect()
    }
}

fn evaluate<R: Record + ?Sized>(condition: &Condition, record: &R) -> bool {
    match condition {
        Condition::Leaf { attribute, literal } => literal_matches(literal, &record.value(attribute)),
        Condition::Group {
            mode,
            negated,
            children,
        } => {
            let result = match mode {
                Mode::And => children.iter().all(|child| evaluate(child, record)),
                Mode::Or => children.iter().any(|child| evaluate(child, record)),
            };
            result != *negated
        }
    }
}

/// Returns true if `value` satisfies `literal`.
///
/// Every comparison against a null value is false; only
/// [`TypedLiteral::Null`] matches it.
pub fn literal_matches(literal: &TypedLiteral, value: &Value) -> bool {
    if value.is_null() {
        return matches!(literal, TypedLiteral::Null);
    }

    match literal {
        TypedLiteral::Null => false,
        TypedLiteral::ExactString(expected) | TypedLiteral::EnumExact(expected) => {
            value.to_text().as_deref() == Some(expected.as_str())
        }
        TypedLiteral::LikeString(pattern) => {
            value.to_text().is_some_and(|text| pattern.matches(&text))
        }
        TypedLiteral::Number(number) => compare_number(value, number) == Some(Ordering::Equal),
        TypedLiteral::NumberRange(low, high) => {
            matches!(
                compare_number(value, low),
                Some(Ordering::Greater | Ordering::Equal)
            ) && matches!(
                compare_number(value, high),
                Some(Ordering::Less | Ordering::Equal)
            )
        }
        TypedLiteral::DateTimeRange(start, end) => value
            .as_datetime()
            .is_some_and(|dt| *start <= dt && dt <= *end),
        TypedLiteral::LessThan(bound) => compare_bound(value, bound) == Some(Ordering::Less),
        TypedLiteral::GreaterThan(bound) => compare_bound(value, bound) == Some(Ordering::Greater),
        TypedLiteral::Boolean(expected) => value.as_bool() == Some(*expected),
        TypedLiteral::EnumFuzzySet(values) => value
            .to_text()
            .is_some_and(|text| values.iter().any(|v| *v == text)),
        TypedLiteral::Membership(items) => items.iter().any(|item| literal_matches(item, value)),
        TypedLiteral::Unrecognized => true,
    }
}

fn compare_number(value: &Value, number: &NumberValue) -> Option<Ordering> {
    match number {
        NumberValue::Float(expected) => (value.as_f64()? as f32).partial_cmp(expected),
        NumberValue::Double(expected) => value.as_f64()?.partial_cmp(expected),
        integer => match (value.as_i64(), integer.as_i64()) {
            (Some(actual), Some(expected)) => Some(actual.cmp(&expected)),
            _ => value.as_f64()?.partial_cmp(&integer.as_f64()),
        },
    }
}

fn compare_bound(value: &Value, bound: &Bound) -> Option<Ordering> {
    match bound {
        Bound::Number(number) => compare_number(value, number),
        Bound::DateTime(limit) => Some(value.as_datetime()?.cmp(limit)),
    }
}
