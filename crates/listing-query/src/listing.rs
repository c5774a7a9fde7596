//! In-memory execution of compiled listings.
//!
//! [`Listing`] plays the backend role for plain record slices: it filters
//! with the compiled condition, orders by the sort spec and cuts the page.
//! Counting, stats and terms all use the same condition as the page fetch.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ListingError;
use crate::filter::{Record, Value};
use crate::query::CompiledListing;
use crate::sort::SortSpec;

/// Summary of a listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    /// Number of records matching the condition.
    pub count: usize,
    pub current_page: usize,
    /// `ceil(count / limit)`; `1` for an unbounded non-empty listing.
    pub number_of_pages: usize,
    /// Offset of the first returned record.
    pub start_index: usize,
    /// Offset one past the last returned record.
    pub end_index: usize,
    pub limit: usize,
    pub sort: SortSpec,
    /// Rendered condition, if any filter applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingResult<T> {
    pub metadata: Metadata,
    pub results: Vec<T>,
}

/// Aggregate(s) to compute over a numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsOperation {
    Count,
    Min,
    Max,
    Avg,
    Sum,
    /// Every aggregate.
    #[default]
    All,
}

impl FromStr for StatsOperation {
    type Err = ListingError;

    /// Parses an operation name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(StatsOperation::Count),
            "min" => Ok(StatsOperation::Min),
            "max" => Ok(StatsOperation::Max),
            "avg" => Ok(StatsOperation::Avg),
            "sum" => Ok(StatsOperation::Sum),
            "all" => Ok(StatsOperation::All),
            _ => Err(ListingError::UnknownStatsOperation(s.to_string())),
        }
    }
}

impl fmt::Display for StatsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatsOperation::Count => "count",
            StatsOperation::Min => "min",
            StatsOperation::Max => "max",
            StatsOperation::Avg => "avg",
            StatsOperation::Sum => "sum",
            StatsOperation::All => "all",
        };
        f.write_str(name)
    }
}

/// Aggregates over the numeric values of one attribute.
///
/// Only the requested aggregates are set. Null and non-numeric values are
/// skipped, so `count` is the number of numeric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
}

/// A distinct attribute value and how many matching records carry it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub value: Value,
    pub count: usize,
}

/// Executes compiled listings against record slices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Listing;

impl Listing {
    /// Filters, sorts and pages `records`.
    ///
    /// Sorting is stable; null values sort last in either direction.
    pub fn execute<'r, R: Record>(
        records: &'r [R],
        compiled: &CompiledListing,
    ) -> ListingResult<&'r R> {
        let matched = Self::sorted_matches(records, compiled);
        let count = matched.len();
        let page = compiled.page;

        let results: Vec<&R> = if page.is_unbounded() {
            matched.into_iter().skip(page.offset).collect()
        } else {
            matched
                .into_iter()
                .skip(page.offset)
                .take(page.limit)
                .collect()
        };

        let number_of_pages = match page.limit {
            0 => usize::from(count > 0),
            limit => count.div_ceil(limit),
        };

        tracing::debug!(count, returned = results.len(), "executed listing");

        ListingResult {
            metadata: Metadata {
                count,
                current_page: page.page,
                number_of_pages,
                start_index: page.offset.min(count),
                end_index: page.offset.min(count) + results.len(),
                limit: page.limit,
                sort: compiled.sort.clone(),
                filter: compiled.condition.as_ref().map(ToString::to_string),
            },
            results,
        }
    }

    /// Number of records matching the condition.
    pub fn count<R: Record>(records: &[R], compiled: &CompiledListing) -> usize {
        records.iter().filter(|record| compiled.matches(*record)).count()
    }

    /// Computes aggregates over `attribute` for the matching records.
    pub fn stats<R: Record>(
        records: &[R],
        compiled: &CompiledListing,
        attribute: &str,
        operation: StatsOperation,
    ) -> Stats {
        let values: Vec<f64> = records
            .iter()
            .filter(|record| compiled.matches(*record))
            .filter_map(|record| record.value(attribute).as_f64())
            .collect();

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().reduce(f64::min);
        let max = values.iter().copied().reduce(f64::max);
        let avg = (count > 0).then(|| sum / count as f64);
        let sum = (count > 0).then_some(sum);

        let wants = |op: StatsOperation| operation == op || operation == StatsOperation::All;
        Stats {
            count: wants(StatsOperation::Count).then_some(count),
            min: if wants(StatsOperation::Min) { min } else { None },
            max: if wants(StatsOperation::Max) { max } else { None },
            avg: if wants(StatsOperation::Avg) { avg } else { None },
            sum: if wants(StatsOperation::Sum) { sum } else { None },
        }
    }

    /// Returns the `max` most frequent values of `attribute` among the
    /// matching records, most frequent first.
    ///
    /// Ties keep the order in which values first appear.
    pub fn terms<R: Record>(
        records: &[R],
        compiled: &CompiledListing,
        attribute: &str,
        max: usize,
    ) -> Vec<Term> {
        let mut terms: Vec<Term> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for record in records.iter().filter(|record| compiled.matches(*record)) {
            let value = record.value(attribute);
            let key = term_key(&value);
            match positions.get(&key) {
                Some(&i) => terms[i].count += 1,
                None => {
                    positions.insert(key, terms.len());
                    terms.push(Term { value, count: 1 });
                }
            }
        }

        terms.sort_by(|a, b| b.count.cmp(&a.count));
        terms.truncate(max);
        terms
    }

    fn sorted_matches<'r, R: Record>(records: &'r [R], compiled: &CompiledListing) -> Vec<&'r R> {
        let matched = records.iter().filter(|record| compiled.matches(*record));
        if compiled.sort.is_empty() {
            return matched.collect();
        }

        let mut decorated: Vec<(Vec<Value>, &R)> = matched
            .map(|record| {
                let keys = compiled
                    .sort
                    .iter()
                    .map(|key| record.value(&key.attribute))
                    .collect();
                (keys, record)
            })
            .collect();

        decorated.sort_by(|(a, _), (b, _)| compare_keys(a, b, &compiled.sort));
        decorated.into_iter().map(|(_, record)| record).collect()
    }
}

fn term_key(value: &Value) -> String {
    match value {
        Value::Null => "\0null".to_string(),
        other => format!("{other:?}"),
    }
}

fn compare_keys(a: &[Value], b: &[Value], sort: &SortSpec) -> Ordering {
    for ((left, right), key) in a.iter().zip(b).zip(sort.iter()) {
        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = left.compare(right).unwrap_or(Ordering::Equal);
                if key.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
