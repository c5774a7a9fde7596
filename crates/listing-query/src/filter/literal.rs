//! Typed literals produced by the value classifier.

use std::fmt;

use chrono::NaiveDateTime;
use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};

use crate::config::Wildcards;

/// A parsed number, tagged with its numeric kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberValue {
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl NumberValue {
    /// The value widened to `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            NumberValue::Short(v) => f64::from(v),
            NumberValue::Integer(v) => f64::from(v),
            NumberValue::Long(v) => v as f64,
            NumberValue::Float(v) => f64::from(v),
            NumberValue::Double(v) => v,
        }
    }

    /// The value as `i64` for the integer family.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            NumberValue::Short(v) => Some(i64::from(v)),
            NumberValue::Integer(v) => Some(i64::from(v)),
            NumberValue::Long(v) => Some(v),
            NumberValue::Float(_) | NumberValue::Double(_) => None,
        }
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Short(v) => write!(f, "{v}"),
            NumberValue::Integer(v) => write!(f, "{v}"),
            NumberValue::Long(v) => write!(f, "{v}"),
            NumberValue::Float(v) => write!(f, "{v}"),
            NumberValue::Double(v) => write!(f, "{v}"),
        }
    }
}

/// Right-hand side of a strict inequality.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Number(NumberValue),
    DateTime(NaiveDateTime),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Number(n) => write!(f, "{n}"),
            Bound::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

/// A case-insensitive pattern in SQL `LIKE` syntax.
///
/// `%` matches any run, `_` one character, and `\` escapes the next
/// character. Literal `%`, `_` and `\` from user input are always escaped,
/// so only the configured wildcard tokens produce wildcards.
#[derive(Debug, Clone)]
pub struct LikePattern {
    pattern: String,
    regex: Regex,
}

impl LikePattern {
    /// Escape character used in [`LikePattern::as_str`].
    pub const ESCAPE: char = '\\';

    /// Builds a pattern from raw filter input.
    ///
    /// Input without wildcard tokens becomes a "contains" match (`%input%`);
    /// input with wildcard tokens is taken as a whole-value pattern. Wildcard
    /// tokens are matched against the input as given, literal characters are
    /// lower-cased as they are emitted.
    ///
    /// Returns `None` if the pattern is too large to compile.
    pub fn from_filter(value: &str, wildcards: &Wildcards) -> Option<Self> {
        let mut pattern = String::with_capacity(value.len() + 2);
        let mut used_wildcard = false;
        let mut rest = value;

        while let Some(c) = rest.chars().next() {
            if !wildcards.many.is_empty() && rest.starts_with(wildcards.many.as_str()) {
                pattern.push('%');
                used_wildcard = true;
                rest = &rest[wildcards.many.len()..];
                continue;
            }
            if !wildcards.one.is_empty() && rest.starts_with(wildcards.one.as_str()) {
                pattern.push('_');
                used_wildcard = true;
                rest = &rest[wildcards.one.len()..];
                continue;
            }
            for lower in c.to_lowercase() {
                if matches!(lower, '%' | '_' | Self::ESCAPE) {
                    pattern.push(Self::ESCAPE);
                }
                pattern.push(lower);
            }
            rest = &rest[c.len_utf8()..];
        }

        if !used_wildcard {
            pattern = format!("%{pattern}%");
        }
        Self::from_like(pattern)
    }

    /// Wraps an already-escaped `LIKE` pattern.
    ///
    /// Returns `None` if the pattern is too large to compile.
    pub fn from_like(pattern: impl Into<String>) -> Option<Self> {
        let pattern = pattern.into();
        let regex = like_to_regex(&pattern)?;
        Some(Self { pattern, regex })
    }

    /// The pattern in `LIKE` syntax (lower-cased, escaped with `\`).
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if `text` matches, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Serialize for LikePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

fn like_to_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::from("^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            LikePattern::ESCAPE => {
                if let Some(escaped) = chars.next() {
                    source.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4])));
                }
            }
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');
    // Every character is either escaped or a fixed construct, so the only
    // failure left is exceeding the compiled size limit.
    match RegexBuilder::new(&source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::debug!(len = pattern.len(), error = %e, "LIKE pattern not compilable");
            None
        }
    }
}

/// Result of classifying a raw string against a declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypedLiteral {
    /// The value is missing.
    Null,
    /// Case-sensitive equality on the textual form.
    ExactString(String),
    /// Case-insensitive pattern match on the textual form.
    LikeString(LikePattern),
    /// Numeric equality.
    Number(NumberValue),
    /// Inclusive numeric range.
    NumberRange(NumberValue, NumberValue),
    /// Inclusive date/time range.
    DateTimeRange(NaiveDateTime, NaiveDateTime),
    LessThan(Bound),
    GreaterThan(Bound),
    Boolean(bool),
    /// Equality with one declared enum constant.
    EnumExact(String),
    /// Equality with any of the listed enum constants; empty matches nothing.
    EnumFuzzySet(Vec<String>),
    /// Equality with any of the listed literals.
    Membership(Vec<TypedLiteral>),
    /// No predicate can be built; contributes no constraint.
    Unrecognized,
}

impl TypedLiteral {
    /// Returns false for [`TypedLiteral::Unrecognized`].
    pub fn is_recognized(&self) -> bool {
        !matches!(self, TypedLiteral::Unrecognized)
    }
}

impl fmt::Display for TypedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedLiteral::Null => write!(f, "IS NULL"),
            TypedLiteral::ExactString(s) => write!(f, "= '{s}'"),
            TypedLiteral::LikeString(p) => write!(f, "LIKE '{}'", p.as_str()),
            TypedLiteral::Number(n) => write!(f, "= {n}"),
            TypedLiteral::NumberRange(lo, hi) => write!(f, "BETWEEN {lo} AND {hi}"),
            TypedLiteral::DateTimeRange(lo, hi) => write!(f, "BETWEEN {lo} AND {hi}"),
            TypedLiteral::LessThan(b) => write!(f, "< {b}"),
            TypedLiteral::GreaterThan(b) => write!(f, "> {b}"),
            TypedLiteral::Boolean(b) => write!(f, "= {b}"),
            TypedLiteral::EnumExact(s) => write!(f, "= {s}"),
            TypedLiteral::EnumFuzzySet(values) => write!(f, "IN {{{}}}", values.join(", ")),
            TypedLiteral::Membership(items) => {
                let items: Vec<String> = items.iter().map(membership_item).collect();
                write!(f, "IN ({})", items.join(", "))
            }
            TypedLiteral::Unrecognized => write!(f, "<unrecognized>"),
        }
    }
}

fn membership_item(literal: &TypedLiteral) -> String {
    match literal {
        TypedLiteral::ExactString(s) => format!("'{s}'"),
        TypedLiteral::Number(n) => n.to_string(),
        TypedLiteral::EnumExact(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn like(value: &str) -> LikePattern {
        LikePattern::from_filter(value, &Wildcards::default()).unwrap()
    }

    #[test]
    fn test_like_contains_without_wildcards() {
        let pattern = like("Foo");
        assert_eq!(pattern.as_str(), "%foo%");
        assert!(pattern.matches("a FOO b"));
        assert!(!pattern.matches("fo"));
    }

    #[test]
    fn test_like_translates_wildcards() {
        let pattern = like("A*b?");
        assert_eq!(pattern.as_str(), "a%b_");
        assert!(pattern.matches("axxxbc"));
        assert!(!pattern.matches("xab1"));
        assert!(!pattern.matches("ab"));
    }

    #[test]
    fn test_like_escapes_backend_metacharacters() {
        let pattern = like("50%_off");
        assert_eq!(pattern.as_str(), r"%50\%\_off%");
        assert!(pattern.matches("get 50%_off now"));
        assert!(!pattern.matches("50x1off"));
    }

    #[test]
    fn test_like_escapes_backslash() {
        let pattern = like(r"a\b");
        assert_eq!(pattern.as_str(), r"%a\\b%");
        assert!(pattern.matches(r"xa\by"));
    }

    #[test]
    fn test_like_custom_multichar_wildcards() {
        let wildcards = Wildcards {
            many: "..".to_string(),
            one: "#".to_string(),
        };
        let pattern = LikePattern::from_filter("ab..c#", &wildcards).unwrap();
        assert_eq!(pattern.as_str(), "ab%c_");
        assert!(pattern.matches("ab123cd"));
    }

    #[test]
    fn test_like_uppercase_wildcard_tokens() {
        let wildcards = Wildcards {
            many: "ANY".to_string(),
            one: "X".to_string(),
        };
        let pattern = LikePattern::from_filter("FooANYbaX", &wildcards).unwrap();
        assert_eq!(pattern.as_str(), "foo%ba_");
        assert!(pattern.matches("FOO and bar"));
        assert!(!pattern.matches("foo and ba"));

        // Lower-case input does not form the token.
        let pattern = LikePattern::from_filter("fooany", &wildcards).unwrap();
        assert_eq!(pattern.as_str(), "%fooany%");
    }

    #[test]
    fn test_like_oversized_pattern_is_none() {
        let value = "ä".repeat(200_000);
        assert!(LikePattern::from_filter(&value, &Wildcards::default()).is_none());
    }

    #[test]
    fn test_like_regex_metachars_are_literal() {
        let pattern = like("a.b");
        assert!(pattern.matches("a.b"));
        assert!(!pattern.matches("axb"));
    }

    #[test]
    fn test_number_value_widening() {
        assert_eq!(NumberValue::Short(3).as_f64(), 3.0);
        assert_eq!(NumberValue::Long(7).as_i64(), Some(7));
        assert_eq!(NumberValue::Double(1.5).as_i64(), None);
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(TypedLiteral::Number(NumberValue::Integer(5)).to_string(), "= 5");
        assert_eq!(
            TypedLiteral::NumberRange(NumberValue::Long(1), NumberValue::Long(9)).to_string(),
            "BETWEEN 1 AND 9"
        );
        assert_eq!(
            TypedLiteral::Membership(vec![
                TypedLiteral::Number(NumberValue::Integer(1)),
                TypedLiteral::ExactString("x".to_string()),
            ])
            .to_string(),
            "IN (1, 'x')"
        );
        assert_eq!(TypedLiteral::Null.to_string(), "IS NULL");
    }
}
