//! Predicate tree builder.
//!
//! Compiles structural [`PredicateNode`] trees into typed [`Condition`] trees:
//! attributes are checked against the schema, literals are classified, and
//! anything that cannot constrain the result is dropped.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::ListingConfig;
use crate::schema::EntitySchema;

use super::ast::{Leaf, MatchKind, Mode, PredicateNode, PredicateSpec};
use super::classify::Classifier;
use super::literal::TypedLiteral;
use super::parser::ExpressionParser;

/// A compiled, typed filter condition.
///
/// Every leaf references an attribute of the schema and carries a recognized
/// literal; every group has at least one child.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Condition {
    Leaf {
        attribute: String,
        literal: TypedLiteral,
    },
    Group {
        mode: Mode,
        negated: bool,
        children: Vec<Condition>,
    },
}

impl Condition {
    /// Joins parts with AND.
    ///
    /// Returns `None` for no parts and the part itself for a single one.
    pub fn conjunction(mut parts: Vec<Condition>) -> Option<Condition> {
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Condition::Group {
                mode: Mode::And,
                negated: false,
                children: parts,
            }),
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::Leaf { .. } => 1,
            Condition::Group { children, .. } => children.iter().map(Self::leaf_count).sum(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Leaf { attribute, literal } => write!(f, "{attribute} {literal}"),
            Condition::Group {
                mode,
                negated,
                children,
            } => {
                if *negated {
                    f.write_str("NOT ")?;
                }
                f.write_str("(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {mode} ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Builds conditions for one entity schema.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    schema: &'a EntitySchema,
    config: &'a ListingConfig,
    parser: ExpressionParser<'a>,
    classifier: Classifier<'a>,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder for `schema` using `config`.
    pub fn new(schema: &'a EntitySchema, config: &'a ListingConfig) -> Self {
        Self {
            schema,
            config,
            parser: ExpressionParser::new(config),
            classifier: Classifier::new(config),
        }
    }

    /// Builds the structural tree for an attribute filter map.
    ///
    /// The top-level group is AND unless the disjunction key is present; the
    /// disjunction key itself contributes no leaf.
    pub fn map_to_node(&self, filters: &BTreeMap<String, String>) -> PredicateNode {
        let mut mode = Mode::And;
        let mut children = Vec::with_capacity(filters.len());

        for (key, value) in filters {
            if *key == self.config.disjunction_key {
                mode = Mode::Or;
                continue;
            }
            if let Some(node) = self.parser.parse(key, value) {
                children.push(node);
            }
        }

        PredicateNode::group(mode, children)
    }

    /// Builds the structural tree for a global search term.
    ///
    /// Every attribute not excluded from global search is filtered by `term`,
    /// and any one of them matching is enough.
    pub fn global_search_node(&self, term: &str) -> PredicateNode {
        if term.trim().is_empty() {
            return PredicateNode::empty();
        }

        let mut filters: BTreeMap<String, String> = self
            .schema
            .searchable()
            .map(|name| (name.to_string(), term.to_string()))
            .collect();
        filters.insert(self.config.disjunction_key.clone(), String::new());
        self.map_to_node(&filters)
    }

    /// Compiles an attribute filter map.
    pub fn build_from_map(&self, filters: &BTreeMap<String, String>) -> Option<Condition> {
        self.compile(&self.map_to_node(filters))
    }

    /// Compiles a global search term.
    pub fn build_global_search(&self, term: &str) -> Option<Condition> {
        self.compile(&self.global_search_node(term))
    }

    /// Compiles a caller-supplied tree.
    ///
    /// The structure and flags are kept as given; only leaves are validated.
    pub fn build_from_tree(&self, spec: &PredicateSpec) -> Option<Condition> {
        self.compile(&PredicateNode::from(spec))
    }

    /// Compiles a structural tree.
    ///
    /// Returns `None` if nothing in the tree constrains the result.
    pub fn compile(&self, node: &PredicateNode) -> Option<Condition> {
        match node {
            PredicateNode::Leaf(leaf) => self.compile_leaf(leaf),
            PredicateNode::Group(group) => {
                let children: Vec<Condition> = group
                    .children
                    .iter()
                    .filter_map(|child| self.compile(child))
                    .collect();
                if children.is_empty() {
                    tracing::debug!(mode = %group.mode, negated = group.negated, "pruning empty group");
                    return None;
                }
                Some(Condition::Group {
                    mode: group.mode,
                    negated: group.negated,
                    children,
                })
            }
        }
    }

    fn compile_leaf(&self, leaf: &Leaf) -> Option<Condition> {
        let attribute = leaf.attribute.trim();
        let Some(spec) = self.schema.attribute(attribute) else {
            tracing::debug!(attribute, "dropping filter on unknown attribute");
            return None;
        };
        if leaf.value.trim().is_empty() {
            return None;
        }

        let literal = match leaf.kind {
            MatchKind::Match => self.classifier.classify(&leaf.value, spec),
            MatchKind::Membership => self.classifier.classify_membership(&leaf.value, spec),
        };
        tracing::trace!(attribute, value = %leaf.value, %literal, "classified filter literal");

        if !literal.is_recognized() {
            tracing::debug!(
                attribute,
                value = %leaf.value,
                semantic_type = %spec.effective_type(),
                "dropping unrecognized filter literal"
            );
            return None;
        }

        Some(Condition::Leaf {
            attribute: attribute.to_string(),
            literal,
        })
    }
}
