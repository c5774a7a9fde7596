//! Value classification.
//!
//! Turns one raw filter literal into a [`TypedLiteral`] according to the
//! attribute's declared [`SemanticType`]. Classification never fails: input
//! that fits no rule becomes [`TypedLiteral::Unrecognized`].
//!
//! # Literal Shapes
//!
//! | Type     | Shapes                                                        |
//! |----------|---------------------------------------------------------------|
//! | any      | `NULL`                                                        |
//! | string   | `"exact"`, `contains`, `wild*card?`                           |
//! | numeric  | `5`, `~5` / `LIKE 5`, `<5` / `LT 5`, `>5` / `GT 5`, `1-9`, `1 TO 9` |
//! | date     | `01.02.2024`, `02.2024`, `2024`, `2024-02-01`, `<d`, `>d`, `d1-d2`  |
//! | boolean  | `true`, `false`                                               |
//! | enum     | `"EXACT"`, `fuzzy`                                            |

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::config::{ListingConfig, Wildcards};
use crate::schema::{AttributeSpec, SemanticType};

use super::literal::{Bound, LikePattern, NumberValue, TypedLiteral};

const INTEGER: &str = r"[+-]?\d+";
const DATE: &str = r"(?:\d{1,2}\.\d{1,2}\.\d{4}|\d{4}-\d{1,2}-\d{1,2})(?:[ T]\d{1,2}:\d{2}(?::\d{2})?)?|\d{1,2}\.\d{4}|\d{4}";

/// Returns true if `value` is wrapped in a matching pair of quotes.
pub fn is_quoted(value: &str) -> bool {
    value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
}

/// Strips a matching pair of surrounding quotes, if present.
pub fn remove_quotes(value: &str) -> &str {
    if is_quoted(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Returns true if `value` uses either configured wildcard token.
pub fn has_wildcard(value: &str, wildcards: &Wildcards) -> bool {
    (!wildcards.many.is_empty() && value.contains(wildcards.many.as_str()))
        || (!wildcards.one.is_empty() && value.contains(wildcards.one.as_str()))
}

/// Parses a `short` literal.
pub fn parse_short(value: &str) -> Option<i16> {
    value.parse().ok()
}

/// Parses an `integer` literal.
pub fn parse_integer(value: &str) -> Option<i32> {
    value.parse().ok()
}

/// Parses a `long` literal.
pub fn parse_long(value: &str) -> Option<i64> {
    value.parse().ok()
}

/// Parses a `float` literal, accepting any configured decimal separator.
pub fn parse_float(value: &str, separators: &[String]) -> Option<f32> {
    let normalized = normalize_decimal(value, separators)?;
    normalized.parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Parses a `double` literal, accepting any configured decimal separator.
pub fn parse_double(value: &str, separators: &[String]) -> Option<f64> {
    let normalized = normalize_decimal(value, separators)?;
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rewrites configured separators to `.` and rejects non-decimal text
/// (`inf`, `NaN`, hex, type suffixes).
fn normalize_decimal(value: &str, separators: &[String]) -> Option<String> {
    if value.contains('.') && !separators.iter().any(|sep| sep == ".") {
        return None;
    }
    let mut normalized = value.to_string();
    for sep in separators.iter().filter(|sep| sep.as_str() != ".") {
        normalized = normalized.replace(sep.as_str(), ".");
    }
    let plain = normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    let has_digit = normalized.chars().any(|c| c.is_ascii_digit());
    (plain && has_digit).then_some(normalized)
}

/// Parses a number of the given numeric type.
///
/// Returns `None` for non-numeric types or invalid input.
pub fn parse_number(
    value: &str,
    semantic_type: &SemanticType,
    separators: &[String],
) -> Option<NumberValue> {
    match semantic_type {
        SemanticType::Short => parse_short(value).map(NumberValue::Short),
        SemanticType::Integer => parse_integer(value).map(NumberValue::Integer),
        SemanticType::Long => parse_long(value).map(NumberValue::Long),
        SemanticType::Float => parse_float(value, separators).map(NumberValue::Float),
        SemanticType::Double => parse_double(value, separators).map(NumberValue::Double),
        SemanticType::String
        | SemanticType::Boolean
        | SemanticType::Enum { .. }
        | SemanticType::Date
        | SemanticType::DateTime => None,
    }
}

/// Parses a date literal into the inclusive period it denotes.
///
/// `dd.MM.yyyy` and `yyyy-MM-dd` denote a day, `MM.yyyy` a month, `yyyy` a
/// year. A day followed by a time denotes that instant.
pub fn parse_date_period(value: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
    const INSTANT_FORMATS: [&str; 6] = [
        "%d.%m.%Y %H:%M:%S",
        "%d.%m.%Y %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    let value = value.trim();
    for format in INSTANT_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(value, format) {
            return Some((instant, instant));
        }
    }

    for format in ["%d.%m.%Y", "%Y-%m-%d"] {
        if let Ok(day) = NaiveDate::parse_from_str(value, format) {
            return Some((day.and_time(NaiveTime::MIN), end_of_day(day)));
        }
    }

    if let Some((month, year)) = value.split_once('.') {
        let month: u32 = month.parse().ok()?;
        let year: i32 = year.parse().ok()?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        return Some((first.and_time(NaiveTime::MIN), end_before(next)));
    }

    if value.len() == 4 {
        let year: i32 = value.parse().ok()?;
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let next = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
        return Some((first.and_time(NaiveTime::MIN), end_before(next)));
    }

    None
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.succ_opt()
        .map(end_before)
        .unwrap_or_else(|| day.and_time(NaiveTime::MIN))
}

fn end_before(next: NaiveDate) -> NaiveDateTime {
    next.and_time(NaiveTime::MIN) - Duration::nanoseconds(1)
}

/// Classifies raw literals using one configuration snapshot.
///
/// The range and date grammars depend on the configured TO operator, so
/// their patterns are compiled once per classifier.
#[derive(Debug)]
pub struct Classifier<'a> {
    config: &'a ListingConfig,
    integer_range: Regex,
    decimal_range: Regex,
    date: Regex,
    date_range: Regex,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier for the given configuration.
    pub fn new(config: &'a ListingConfig) -> Self {
        let to = &config.operators.to;
        let separator = match to.infix_word() {
            Some(_) => format!(
                r"\s*{}\s*|\s+{}\s+",
                regex::escape(&to.symbol),
                regex::escape(&to.word)
            ),
            None => format!(r"\s*{}\s*", regex::escape(&to.symbol)),
        };

        let decimal_marks: Vec<String> = config
            .decimal_separators
            .iter()
            .map(|sep| regex::escape(sep))
            .collect();
        let decimal = if decimal_marks.is_empty() {
            INTEGER.to_string()
        } else {
            format!(r"[+-]?\d+(?:(?:{})\d+)?", decimal_marks.join("|"))
        };

        Self {
            config,
            integer_range: build_range(INTEGER, &separator),
            decimal_range: build_range(&decimal, &separator),
            date: Regex::new(&format!("^(?:{DATE})$")).expect("date pattern is valid"),
            date_range: build_range(DATE, &separator),
        }
    }

    /// The configuration this classifier reads.
    pub fn config(&self) -> &ListingConfig {
        self.config
    }

    /// Classifies `raw` against an attribute, honouring its string override.
    pub fn classify(&self, raw: &str, attribute: &AttributeSpec) -> TypedLiteral {
        self.classify_as(raw, attribute.effective_type())
    }

    /// Classifies `raw` against a semantic type.
    ///
    /// The NULL token takes precedence over every type rule.
    pub fn classify_as(&self, raw: &str, semantic_type: &SemanticType) -> TypedLiteral {
        let raw = raw.trim();
        if raw.is_empty() {
            return TypedLiteral::Unrecognized;
        }
        if self.config.is_null_token(raw) {
            return TypedLiteral::Null;
        }

        match semantic_type {
            SemanticType::String => self.classify_string(raw),
            SemanticType::Short
            | SemanticType::Integer
            | SemanticType::Long
            | SemanticType::Float
            | SemanticType::Double => self.classify_number(raw, semantic_type),
            SemanticType::Date | SemanticType::DateTime => self.classify_date(raw),
            SemanticType::Boolean => self.classify_boolean(raw),
            SemanticType::Enum { values } => classify_enum(raw, values),
        }
    }

    /// Classifies an OR-joined list as a membership literal.
    ///
    /// Parts that are not valid for the attribute type are skipped. Boolean
    /// and date attributes have no membership form.
    pub fn classify_membership(&self, raw: &str, attribute: &AttributeSpec) -> TypedLiteral {
        let semantic_type = attribute.effective_type();
        let parts = self.config.operators.or.split(raw);

        let items: Vec<TypedLiteral> = match semantic_type {
            SemanticType::String => parts
                .iter()
                .map(|part| TypedLiteral::ExactString(remove_quotes(part).to_string()))
                .collect(),
            SemanticType::Short
            | SemanticType::Integer
            | SemanticType::Long
            | SemanticType::Float
            | SemanticType::Double => parts
                .iter()
                .filter_map(|part| {
                    parse_number(
                        remove_quotes(part),
                        semantic_type,
                        &self.config.decimal_separators,
                    )
                })
                .map(TypedLiteral::Number)
                .collect(),
            SemanticType::Enum { values } => parts
                .iter()
                .map(|part| remove_quotes(part))
                .filter(|part| values.iter().any(|v| v == part))
                .map(|part| TypedLiteral::EnumExact(part.to_string()))
                .collect(),
            SemanticType::Boolean | SemanticType::Date | SemanticType::DateTime => Vec::new(),
        };

        if items.is_empty() {
            TypedLiteral::Unrecognized
        } else {
            TypedLiteral::Membership(items)
        }
    }

    fn classify_string(&self, raw: &str) -> TypedLiteral {
        if is_quoted(raw) {
            return TypedLiteral::ExactString(remove_quotes(raw).to_string());
        }
        LikePattern::from_filter(raw, &self.config.wildcards)
            .map_or(TypedLiteral::Unrecognized, TypedLiteral::LikeString)
    }

    fn classify_number(&self, raw: &str, semantic_type: &SemanticType) -> TypedLiteral {
        let separators = &self.config.decimal_separators;
        let ops = &self.config.operators;

        if let Some(number) = parse_number(raw, semantic_type, separators) {
            return TypedLiteral::Number(number);
        }
        if let Some(rest) = ops.like.strip_prefix(raw) {
            if parse_number(rest, semantic_type, separators).is_some() {
                return LikePattern::from_filter(rest, &self.config.wildcards)
                    .map_or(TypedLiteral::Unrecognized, TypedLiteral::LikeString);
            }
        }
        if let Some(rest) = ops.lt.strip_prefix(raw) {
            if let Some(number) = parse_number(rest, semantic_type, separators) {
                return TypedLiteral::LessThan(Bound::Number(number));
            }
        }
        if let Some(rest) = ops.gt.strip_prefix(raw) {
            if let Some(number) = parse_number(rest, semantic_type, separators) {
                return TypedLiteral::GreaterThan(Bound::Number(number));
            }
        }

        let range = match semantic_type {
            SemanticType::Float | SemanticType::Double => &self.decimal_range,
            _ => &self.integer_range,
        };
        if let Some((low, high)) = split_range(range, raw) {
            let low = parse_number(low, semantic_type, separators);
            let high = parse_number(high, semantic_type, separators);
            if let (Some(low), Some(high)) = (low, high) {
                return TypedLiteral::NumberRange(low, high);
            }
        }

        TypedLiteral::Unrecognized
    }

    fn classify_date(&self, raw: &str) -> TypedLiteral {
        let ops = &self.config.operators;

        if let Some((start, end)) = self.date_period(raw) {
            return TypedLiteral::DateTimeRange(start, end);
        }
        if let Some(rest) = ops.lt.strip_prefix(raw) {
            if let Some((start, _)) = self.date_period(rest) {
                return TypedLiteral::LessThan(Bound::DateTime(start));
            }
        }
        if let Some(rest) = ops.gt.strip_prefix(raw) {
            if let Some((_, end)) = self.date_period(rest) {
                return TypedLiteral::GreaterThan(Bound::DateTime(end));
            }
        }
        if let Some((low, high)) = split_range(&self.date_range, raw) {
            if let (Some((start, _)), Some((_, end))) =
                (parse_date_period(low), parse_date_period(high))
            {
                return TypedLiteral::DateTimeRange(start, end);
            }
        }

        TypedLiteral::Unrecognized
    }

    fn date_period(&self, value: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if self.date.is_match(value) {
            parse_date_period(value)
        } else {
            None
        }
    }

    fn classify_boolean(&self, raw: &str) -> TypedLiteral {
        let tokens = &self.config.boolean;
        if raw.eq_ignore_ascii_case(&tokens.true_token) {
            TypedLiteral::Boolean(true)
        } else if raw.eq_ignore_ascii_case(&tokens.false_token) {
            TypedLiteral::Boolean(false)
        } else {
            TypedLiteral::Unrecognized
        }
    }
}

fn classify_enum(raw: &str, values: &[String]) -> TypedLiteral {
    if is_quoted(raw) {
        let exact = remove_quotes(raw);
        return match values.iter().find(|v| v.as_str() == exact) {
            Some(value) => TypedLiteral::EnumExact(value.clone()),
            None => TypedLiteral::Unrecognized,
        };
    }

    let needle = raw.to_uppercase();
    TypedLiteral::EnumFuzzySet(
        values
            .iter()
            .filter(|v| v.to_uppercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

fn build_range(part: &str, separator: &str) -> Regex {
    Regex::new(&format!(
        r"^\s*(?P<low>{part})(?:{separator})(?P<high>{part})\s*$"
    ))
    .expect("range pattern is built from escaped operators")
}

fn split_range<'v>(range: &Regex, value: &'v str) -> Option<(&'v str, &'v str)> {
    let captures = range.captures(value)?;
    Some((captures.name("low")?.as_str(), captures.name("high")?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn separators() -> Vec<String> {
        vec![".".to_string(), ",".to_string()]
    }

    // ==================== Helper Tests ====================

    #[test]
    fn test_quotes() {
        assert!(is_quoted("\"abc\""));
        assert!(is_quoted("'abc'"));
        assert!(!is_quoted("\"abc'"));
        assert!(!is_quoted("\""));
        assert_eq!(remove_quotes("\"abc\""), "abc");
        assert_eq!(remove_quotes("abc"), "abc");
    }

    #[test]
    fn test_has_wildcard() {
        let wildcards = Wildcards::default();
        assert!(has_wildcard("ab*", &wildcards));
        assert!(has_wildcard("a?c", &wildcards));
        assert!(!has_wildcard("abc", &wildcards));
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_short("123"), Some(123));
        assert_eq!(parse_short("40000"), None);
        assert_eq!(parse_integer("-7"), Some(-7));
        assert_eq!(parse_integer("+7"), Some(7));
        assert_eq!(parse_integer("7.0"), None);
        assert_eq!(parse_long("9000000000"), Some(9_000_000_000));
        assert_eq!(parse_long(" 1"), None);
    }

    #[test]
    fn test_parse_decimals() {
        assert_eq!(parse_double("1.5", &separators()), Some(1.5));
        assert_eq!(parse_double("1,5", &separators()), Some(1.5));
        assert_eq!(parse_float("2", &separators()), Some(2.0));
        assert_eq!(parse_double("NaN", &separators()), None);
        assert_eq!(parse_double("inf", &separators()), None);
        assert_eq!(parse_double("abc", &separators()), None);
        assert_eq!(parse_float("1e39", &separators()), None);
    }

    #[test]
    fn test_parse_decimals_respects_configured_separators() {
        let comma_only = vec![",".to_string()];
        assert_eq!(parse_double("1,25", &comma_only), Some(1.25));
        assert_eq!(parse_double("1.25", &comma_only), None);
    }

    #[test]
    fn test_parse_date_period_day() {
        let (start, end) = parse_date_period("01.02.2024").unwrap();
        assert_eq!(start, dt(2024, 2, 1, 0, 0, 0));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));

        let (iso_start, _) = parse_date_period("2024-02-01").unwrap();
        assert_eq!(iso_start, start);
    }

    #[test]
    fn test_parse_date_period_month_and_year() {
        let (start, end) = parse_date_period("2.2024").unwrap();
        assert_eq!(start, dt(2024, 2, 1, 0, 0, 0));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (start, end) = parse_date_period("12.2023").unwrap();
        assert_eq!(start.month(), 12);
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let (start, end) = parse_date_period("2023").unwrap();
        assert_eq!(start, dt(2023, 1, 1, 0, 0, 0));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_parse_date_period_instant() {
        let (start, end) = parse_date_period("01.02.2024 13:45").unwrap();
        assert_eq!(start, dt(2024, 2, 1, 13, 45, 0));
        assert_eq!(start, end);
    }

    #[test]
    fn test_parse_date_period_invalid() {
        assert!(parse_date_period("31.02.2024").is_none());
        assert!(parse_date_period("13.2024").is_none());
        assert!(parse_date_period("yesterday").is_none());
    }

    // ==================== Classifier Tests ====================

    #[test]
    fn test_null_precedes_type_rules() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        for ty in [
            SemanticType::String,
            SemanticType::Integer,
            SemanticType::Boolean,
            SemanticType::Date,
            SemanticType::enumeration(["NULL"]),
        ] {
            assert_eq!(classifier.classify_as("NULL", &ty), TypedLiteral::Null);
        }
    }

    #[test]
    fn test_string_exact_and_like() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);

        assert_eq!(
            classifier.classify_as("\"Anna\"", &SemanticType::String),
            TypedLiteral::ExactString("Anna".to_string())
        );
        match classifier.classify_as("Ann*", &SemanticType::String) {
            TypedLiteral::LikeString(p) => assert_eq!(p.as_str(), "ann%"),
            other => panic!("expected LikeString, got {other:?}"),
        }
    }

    #[test]
    fn test_number_shapes() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        let int = SemanticType::Integer;

        assert_eq!(
            classifier.classify_as("42", &int),
            TypedLiteral::Number(NumberValue::Integer(42))
        );
        assert_eq!(
            classifier.classify_as("-42", &int),
            TypedLiteral::Number(NumberValue::Integer(-42))
        );
        assert_eq!(
            classifier.classify_as("<10", &int),
            TypedLiteral::LessThan(Bound::Number(NumberValue::Integer(10)))
        );
        assert_eq!(
            classifier.classify_as("GT 10", &int),
            TypedLiteral::GreaterThan(Bound::Number(NumberValue::Integer(10)))
        );
        assert_eq!(
            classifier.classify_as("5-10", &int),
            TypedLiteral::NumberRange(NumberValue::Integer(5), NumberValue::Integer(10))
        );
        assert_eq!(
            classifier.classify_as("-5 TO -1", &int),
            TypedLiteral::NumberRange(NumberValue::Integer(-5), NumberValue::Integer(-1))
        );
        match classifier.classify_as("~12", &int) {
            TypedLiteral::LikeString(p) => assert_eq!(p.as_str(), "%12%"),
            other => panic!("expected LikeString, got {other:?}"),
        }
        assert_eq!(classifier.classify_as("abc", &int), TypedLiteral::Unrecognized);
        assert_eq!(classifier.classify_as("<abc", &int), TypedLiteral::Unrecognized);
    }

    #[test]
    fn test_range_overflow_is_unrecognized() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        assert_eq!(
            classifier.classify_as("1-40000", &SemanticType::Short),
            TypedLiteral::Unrecognized
        );
    }

    #[test]
    fn test_decimal_range_with_comma() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        assert_eq!(
            classifier.classify_as("1,5-2.5", &SemanticType::Double),
            TypedLiteral::NumberRange(NumberValue::Double(1.5), NumberValue::Double(2.5))
        );
        assert_eq!(
            classifier.classify_as("0,5", &SemanticType::Float),
            TypedLiteral::Number(NumberValue::Float(0.5))
        );
    }

    #[test]
    fn test_date_shapes() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        let date = SemanticType::DateTime;

        match classifier.classify_as("01.02.2024", &date) {
            TypedLiteral::DateTimeRange(start, end) => {
                assert_eq!(start, dt(2024, 2, 1, 0, 0, 0));
                assert_eq!(end.date(), start.date());
            }
            other => panic!("expected DateTimeRange, got {other:?}"),
        }
        assert_eq!(
            classifier.classify_as("<01.02.2024", &date),
            TypedLiteral::LessThan(Bound::DateTime(dt(2024, 2, 1, 0, 0, 0)))
        );
        match classifier.classify_as("GT 2023", &date) {
            TypedLiteral::GreaterThan(Bound::DateTime(end)) => {
                assert_eq!(end.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
            }
            other => panic!("expected GreaterThan, got {other:?}"),
        }
        match classifier.classify_as("01.01.2024-31.01.2024", &date) {
            TypedLiteral::DateTimeRange(start, end) => {
                assert_eq!(start, dt(2024, 1, 1, 0, 0, 0));
                assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
            }
            other => panic!("expected DateTimeRange, got {other:?}"),
        }
        match classifier.classify_as("2023 TO 2024", &date) {
            TypedLiteral::DateTimeRange(start, end) => {
                assert_eq!(start.year(), 2023);
                assert_eq!(end.year(), 2024);
            }
            other => panic!("expected DateTimeRange, got {other:?}"),
        }
        assert_eq!(classifier.classify_as("soon", &date), TypedLiteral::Unrecognized);
    }

    #[test]
    fn test_iso_date_range() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        match classifier.classify_as("2024-01-01-2024-01-31", &SemanticType::Date) {
            TypedLiteral::DateTimeRange(start, end) => {
                assert_eq!(start, dt(2024, 1, 1, 0, 0, 0));
                assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
            }
            other => panic!("expected DateTimeRange, got {other:?}"),
        }
    }

    #[test]
    fn test_boolean_tokens() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        assert_eq!(
            classifier.classify_as("TRUE", &SemanticType::Boolean),
            TypedLiteral::Boolean(true)
        );
        assert_eq!(
            classifier.classify_as("false", &SemanticType::Boolean),
            TypedLiteral::Boolean(false)
        );
        assert_eq!(
            classifier.classify_as("yes", &SemanticType::Boolean),
            TypedLiteral::Unrecognized
        );
    }

    #[test]
    fn test_enum_exact_and_fuzzy() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        let status = SemanticType::enumeration(["ACTIVE", "INACTIVE", "DELETED"]);

        assert_eq!(
            classifier.classify_as("\"ACTIVE\"", &status),
            TypedLiteral::EnumExact("ACTIVE".to_string())
        );
        assert_eq!(
            classifier.classify_as("\"active\"", &status),
            TypedLiteral::Unrecognized
        );
        assert_eq!(
            classifier.classify_as("active", &status),
            TypedLiteral::EnumFuzzySet(vec!["ACTIVE".to_string(), "INACTIVE".to_string()])
        );
        assert_eq!(
            classifier.classify_as("zzz", &status),
            TypedLiteral::EnumFuzzySet(Vec::new())
        );
    }

    #[test]
    fn test_force_string_attribute() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);
        let code = AttributeSpec::new(SemanticType::Integer).as_string();

        match classifier.classify("12", &code) {
            TypedLiteral::LikeString(p) => assert_eq!(p.as_str(), "%12%"),
            other => panic!("expected LikeString, got {other:?}"),
        }
    }

    #[test]
    fn test_membership() {
        let config = ListingConfig::default();
        let classifier = Classifier::new(&config);

        let ints = AttributeSpec::new(SemanticType::Long);
        assert_eq!(
            classifier.classify_membership("1|x|3", &ints),
            TypedLiteral::Membership(vec![
                TypedLiteral::Number(NumberValue::Long(1)),
                TypedLiteral::Number(NumberValue::Long(3)),
            ])
        );

        let status = AttributeSpec::new(SemanticType::enumeration(["A", "B"]));
        assert_eq!(
            classifier.classify_membership("\"A\"|C", &status),
            TypedLiteral::Membership(vec![TypedLiteral::EnumExact("A".to_string())])
        );

        let flag = AttributeSpec::new(SemanticType::Boolean);
        assert_eq!(
            classifier.classify_membership("true|false", &flag),
            TypedLiteral::Unrecognized
        );
    }

    #[test]
    fn test_custom_to_operator() {
        let mut config = ListingConfig::default();
        config.operators.to.symbol = "..".to_string();
        config.operators.to.word = "BIS".to_string();
        let classifier = Classifier::new(&config);

        assert_eq!(
            classifier.classify_as("1..3", &SemanticType::Integer),
            TypedLiteral::NumberRange(NumberValue::Integer(1), NumberValue::Integer(3))
        );
        assert_eq!(
            classifier.classify_as("1 BIS 3", &SemanticType::Integer),
            TypedLiteral::NumberRange(NumberValue::Integer(1), NumberValue::Integer(3))
        );
    }
}
