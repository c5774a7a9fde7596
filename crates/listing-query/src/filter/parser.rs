//! Expression parser for attribute filter strings.

use crate::config::ListingConfig;

use super::ast::PredicateNode;

/// Parses one raw filter string for one attribute key.
///
/// There is no bracket grouping; precedence is implied by the split order.
///
/// # Grammar
///
/// ```text
/// filter      ::= conjunction
/// conjunction ::= disjunction (AND disjunction)*
/// disjunction ::= literal (OR literal)*
/// literal     ::= NOT? value
/// key         ::= attribute (OR attribute)*
/// ```
///
/// `AND`, `OR` and `NOT` stand for the configured symbol or padded word form
/// of each operator. A disjunction with more alternatives than
/// [`ListingConfig::or_limit`] becomes a single membership leaf.
///
/// # Example
///
/// ```
/// use listing_query_rs::config::ListingConfig;
/// use listing_query_rs::filter::{ExpressionParser, PredicateNode};
///
/// let config = ListingConfig::default();
/// let parser = ExpressionParser::new(&config);
///
/// let node = parser.parse("age", "1&2|3").unwrap();
/// assert_eq!(
///     node,
///     PredicateNode::and(vec![
///         PredicateNode::leaf("age", "1"),
///         PredicateNode::or(vec![
///             PredicateNode::leaf("age", "2"),
///             PredicateNode::leaf("age", "3"),
///         ]),
///     ])
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExpressionParser<'a> {
    config: &'a ListingConfig,
}

impl<'a> ExpressionParser<'a> {
    /// Creates a parser reading operators from `config`.
    pub fn new(config: &'a ListingConfig) -> Self {
        Self { config }
    }

    /// Parses `raw` for `key`.
    ///
    /// A key containing the OR symbol names several candidate attributes;
    /// every AND-term of the value must then match at least one of them.
    /// Returns `None` for a blank filter.
    pub fn parse(&self, key: &str, raw: &str) -> Option<PredicateNode> {
        if raw.trim().is_empty() {
            return None;
        }

        let ops = &self.config.operators;
        if !key.contains(ops.or.symbol.as_str()) {
            return Some(self.parse_conjunction(key.trim(), raw));
        }

        let attributes = ops.or.split(key);
        let node = if ops.and.is_contained_in(raw) {
            PredicateNode::and(
                ops.and
                    .split(raw)
                    .iter()
                    .map(|segment| self.parse_across(&attributes, segment))
                    .collect(),
            )
        } else {
            self.parse_across(&attributes, raw)
        };
        Some(node)
    }

    fn parse_across(&self, attributes: &[String], value: &str) -> PredicateNode {
        PredicateNode::or(
            attributes
                .iter()
                .map(|attribute| self.parse_conjunction(attribute, value))
                .collect(),
        )
    }

    fn parse_conjunction(&self, attribute: &str, value: &str) -> PredicateNode {
        let and = &self.config.operators.and;
        if and.is_contained_in(value) {
            return PredicateNode::and(
                and.split(value)
                    .iter()
                    .map(|segment| self.parse_disjunction(attribute, segment))
                    .collect(),
            );
        }
        self.parse_disjunction(attribute, value)
    }

    fn parse_disjunction(&self, attribute: &str, value: &str) -> PredicateNode {
        let or = &self.config.operators.or;
        if !or.is_contained_in(value) {
            return self.parse_literal(attribute, value);
        }

        let segments = or.split(value);
        if segments.len() > self.config.or_limit {
            tracing::debug!(
                attribute,
                alternatives = segments.len(),
                limit = self.config.or_limit,
                "rewriting OR fan-out as membership"
            );
            let normalized = match or.infix_word() {
                Some(word) => value.replace(word.as_str(), &or.symbol),
                None => value.to_string(),
            };
            return PredicateNode::membership(attribute, normalized);
        }

        PredicateNode::or(
            segments
                .iter()
                .map(|segment| self.parse_literal(attribute, segment))
                .collect(),
        )
    }

    fn parse_literal(&self, attribute: &str, value: &str) -> PredicateNode {
        match self.config.operators.not.strip_prefix(value) {
            Some(rest) => PredicateNode::negate(PredicateNode::leaf(attribute, rest)),
            None => PredicateNode::leaf(attribute, value.trim()),
        }
    }
}
