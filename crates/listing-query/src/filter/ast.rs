//! Structural predicate tree.
//!
//! A [`PredicateNode`] is the output of the expression parser: raw literals
//! arranged in AND/OR groups. No attribute has been validated and no value
//! classified yet; that happens when the builder compiles the tree into a
//! typed [`Condition`](super::Condition).

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a group combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    And,
    Or,
}

impl Mode {
    /// The mode for a disjunctive flag.
    pub fn from_disjunctive(disjunctive: bool) -> Self {
        if disjunctive {
            Mode::Or
        } else {
            Mode::And
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::And => f.write_str("AND"),
            Mode::Or => f.write_str("OR"),
        }
    }
}

/// How a leaf value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// One literal, classified by its shape.
    Match,
    /// An OR-joined list of literals compared by equality.
    Membership,
}

/// A single raw condition on one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub attribute: String,
    pub value: String,
    pub kind: MatchKind,
}

/// A combination of child nodes.
///
/// A group without children contributes nothing and is pruned on compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub mode: Mode,
    pub negated: bool,
    pub children: Vec<PredicateNode>,
}

/// A node of the structural predicate tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum PredicateNode {
    Leaf(Leaf),
    Group(Group),
}

impl PredicateNode {
    /// Creates a leaf matching one literal.
    pub fn leaf(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        PredicateNode::Leaf(Leaf {
            attribute: attribute.into(),
            value: value.into(),
            kind: MatchKind::Match,
        })
    }

    /// Creates a membership leaf over an OR-joined list.
    pub fn membership(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        PredicateNode::Leaf(Leaf {
            attribute: attribute.into(),
            value: value.into(),
            kind: MatchKind::Membership,
        })
    }

    /// Creates a group with the given mode.
    pub fn group(mode: Mode, children: Vec<PredicateNode>) -> Self {
        PredicateNode::Group(Group {
            mode,
            negated: false,
            children,
        })
    }

    /// Creates an AND group.
    ///
    /// # Example
    ///
    /// ```
    /// use listing_query_rs::filter::{Mode, PredicateNode};
    ///
    /// let node = PredicateNode::and(vec![
    ///     PredicateNode::leaf("name", "anna"),
    ///     PredicateNode::leaf("age", "30"),
    /// ]);
    /// assert!(matches!(node, PredicateNode::Group(ref g) if g.mode == Mode::And));
    /// ```
    pub fn and(children: Vec<PredicateNode>) -> Self {
        Self::group(Mode::And, children)
    }

    /// Creates an OR group.
    pub fn or(children: Vec<PredicateNode>) -> Self {
        Self::group(Mode::Or, children)
    }

    /// Wraps a node in a negated single-child group.
    pub fn negate(inner: PredicateNode) -> Self {
        PredicateNode::Group(Group {
            mode: Mode::And,
            negated: true,
            children: vec![inner],
        })
    }

    /// An empty group; compiles to nothing.
    pub fn empty() -> Self {
        Self::and(Vec::new())
    }

    /// Returns true for a group with no children.
    pub fn is_empty(&self) -> bool {
        matches!(self, PredicateNode::Group(group) if group.children.is_empty())
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            PredicateNode::Leaf(_) => 1,
            PredicateNode::Group(group) => group.children.iter().map(Self::leaf_count).sum(),
        }
    }
}

impl fmt::Display for PredicateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateNode::Leaf(leaf) => match leaf.kind {
                MatchKind::Match => write!(f, "{}:{}", leaf.attribute, leaf.value),
                MatchKind::Membership => write!(f, "{} IN [{}]", leaf.attribute, leaf.value),
            },
            PredicateNode::Group(group) => {
                if group.negated {
                    f.write_str("NOT ")?;
                }
                f.write_str("(")?;
                for (i, child) in group.children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", group.mode)?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Caller-supplied predicate tree, as received at the boundary.
///
/// A spec with `predicates` is a group; otherwise `attribute` and `filter`
/// form a leaf. `negation` negates whatever the spec expresses.
///
/// ```json
/// {
///   "disjunctive": true,
///   "predicates": [
///     { "attribute": "status", "filter": "\"OPEN\"" },
///     { "attribute": "priority", "filter": "1|2|3", "membership": true }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredicateSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub disjunctive: bool,
    pub negation: bool,
    pub membership: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub predicates: Vec<PredicateSpec>,
}

impl PredicateSpec {
    /// Creates a leaf spec.
    pub fn filter(attribute: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            attribute: Some(attribute.into()),
            filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// Creates a conjunctive group spec.
    pub fn all(predicates: Vec<PredicateSpec>) -> Self {
        Self {
            predicates,
            ..Self::default()
        }
    }

    /// Creates a disjunctive group spec.
    pub fn any(predicates: Vec<PredicateSpec>) -> Self {
        Self {
            disjunctive: true,
            predicates,
            ..Self::default()
        }
    }

    /// Sets the negation flag.
    pub fn not(mut self) -> Self {
        self.negation = true;
        self
    }

    /// Marks a leaf spec as a membership test.
    pub fn in_list(mut self) -> Self {
        self.membership = true;
        self
    }

    /// Returns true if this spec is a group.
    pub fn has_predicates(&self) -> bool {
        !self.predicates.is_empty()
    }
}

impl From<&PredicateSpec> for PredicateNode {
    /// Converts structurally; a leaf spec without attribute or filter becomes
    /// an empty group.
    fn from(spec: &PredicateSpec) -> Self {
        if spec.has_predicates() {
            return PredicateNode::Group(Group {
                mode: Mode::from_disjunctive(spec.disjunctive),
                negated: spec.negation,
                children: spec.predicates.iter().map(PredicateNode::from).collect(),
            });
        }

        let attribute = spec.attribute.as_deref().unwrap_or_default();
        let filter = spec.filter.as_deref().unwrap_or_default();
        if attribute.is_empty() || filter.is_empty() {
            return PredicateNode::empty();
        }

        let leaf = if spec.membership {
            PredicateNode::membership(attribute, filter)
        } else {
            PredicateNode::leaf(attribute, filter)
        };
        if spec.negation {
            PredicateNode::negate(leaf)
        } else {
            leaf
        }
    }
}

impl From<PredicateSpec> for PredicateNode {
    fn from(spec: PredicateSpec) -> Self {
        PredicateNode::from(&spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_wraps_in_single_child_group() {
        let node = PredicateNode::negate(PredicateNode::leaf("age", "5"));
        match node {
            PredicateNode::Group(group) => {
                assert!(group.negated);
                assert_eq!(group.mode, Mode::And);
                assert_eq!(group.children, vec![PredicateNode::leaf("age", "5")]);
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let node = PredicateNode::or(vec![
            PredicateNode::and(vec![
                PredicateNode::leaf("a", "1"),
                PredicateNode::leaf("a", "2"),
            ]),
            PredicateNode::negate(PredicateNode::membership("b", "x|y")),
        ]);
        assert_eq!(node.to_string(), "((a:1 AND a:2) OR NOT (b IN [x|y]))");
        assert_eq!(node.leaf_count(), 3);
    }

    #[test]
    fn test_spec_leaf_conversion() {
        let node = PredicateNode::from(PredicateSpec::filter("status", "OPEN").not());
        assert_eq!(
            node,
            PredicateNode::negate(PredicateNode::leaf("status", "OPEN"))
        );

        let node = PredicateNode::from(PredicateSpec::filter("id", "1|2").in_list());
        assert_eq!(node, PredicateNode::membership("id", "1|2"));
    }

    #[test]
    fn test_spec_blank_leaf_is_empty() {
        let node = PredicateNode::from(PredicateSpec::filter("status", ""));
        assert!(node.is_empty());
        let node = PredicateNode::from(PredicateSpec::default());
        assert!(node.is_empty());
    }

    #[test]
    fn test_spec_group_keeps_flags() {
        let spec = PredicateSpec::any(vec![
            PredicateSpec::filter("a", "1"),
            PredicateSpec::filter("b", "2"),
        ])
        .not();
        match PredicateNode::from(&spec) {
            PredicateNode::Group(group) => {
                assert_eq!(group.mode, Mode::Or);
                assert!(group.negated);
                assert_eq!(group.children.len(), 2);
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_spec_from_json() {
        let json = r#"{
            "disjunctive": true,
            "predicates": [
                { "attribute": "status", "filter": "OPEN" },
                { "attribute": "id", "filter": "1|2", "membership": true, "negation": true }
            ]
        }"#;
        let spec: PredicateSpec = serde_json::from_str(json).unwrap();
        assert!(spec.disjunctive);
        assert_eq!(spec.predicates.len(), 2);
        assert!(spec.predicates[1].membership);
        assert!(spec.predicates[1].negation);
    }
}
