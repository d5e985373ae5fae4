//! Declarative shape matching over syntax nodes.
//!
//! A `Pattern` describes a node by kind, optional exact text and field
//! sub-patterns. Matching either yields the captured sub-nodes or nothing;
//! a shape mismatch is never an error.
//!
//! ```text
//! (call_expression
//!   function: (selector_expression operand: _ @operand field: (field_identifier) @method)
//!   arguments: (argument_list) @args)
//! ```

use std::fmt;

use arborium_tree_sitter::Node;
use indexmap::IndexMap;

use crate::syntax;

/// Captured nodes by capture name, in pattern order.
pub type Captures<'t> = IndexMap<&'static str, Node<'t>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Any node. The field holding it must still be present.
    Any,
    Node {
        kind: &'static str,
        text: Option<&'static str>,
        fields: Vec<(&'static str, Pattern)>,
    },
    /// First alternative that matches wins.
    Alt(Vec<Pattern>),
    Capture(Box<Pattern>, &'static str),
}

impl Pattern {
    pub fn node(kind: &'static str) -> Self {
        Pattern::Node {
            kind,
            text: None,
            fields: Vec::new(),
        }
    }

    /// Require the node's source text to equal `expected`.
    pub fn text(self, expected: &'static str) -> Self {
        match self {
            Pattern::Node { kind, fields, .. } => Pattern::Node {
                kind,
                text: Some(expected),
                fields,
            },
            other => other,
        }
    }

    pub fn field(self, name: &'static str, pattern: Pattern) -> Self {
        match self {
            Pattern::Node {
                kind,
                text,
                mut fields,
            } => {
                fields.push((name, pattern));
                Pattern::Node { kind, text, fields }
            }
            other => other,
        }
    }

    pub fn capture(self, name: &'static str) -> Self {
        Pattern::Capture(Box::new(self), name)
    }

    /// Match `node` against this pattern.
    ///
    /// Parentheses around expressions and types are transparent unless the
    /// pattern asks for them by kind.
    pub fn matches<'t>(&self, node: Node<'t>, source: &str) -> Option<Captures<'t>> {
        let mut captures = Captures::new();
        self.match_into(node, source, &mut captures)
            .then_some(captures)
    }

    fn match_into<'t>(&self, node: Node<'t>, source: &str, captures: &mut Captures<'t>) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Capture(inner, name) => {
                let node = if matches!(**inner, Pattern::Any) {
                    syntax::unparen(node)
                } else {
                    node
                };
                if !inner.match_into(node, source, captures) {
                    return false;
                }
                captures.insert(*name, inner.resolved(node));
                true
            }
            Pattern::Alt(alternatives) => alternatives.iter().any(|alt| {
                let mut scratch = Captures::new();
                if alt.match_into(node, source, &mut scratch) {
                    captures.extend(scratch);
                    true
                } else {
                    false
                }
            }),
            Pattern::Node { kind, text, fields } => {
                let node = if kind.starts_with("parenthesized_") {
                    node
                } else {
                    syntax::unparen(node)
                };
                if node.kind() != *kind {
                    return false;
                }
                if let Some(expected) = text
                    && syntax::text(node, source) != *expected
                {
                    return false;
                }
                fields.iter().all(|(field, pattern)| {
                    node.child_by_field_name(*field)
                        .is_some_and(|child| pattern.match_into(child, source, captures))
                })
            }
        }
    }

    /// The node a capture of this pattern refers to.
    fn resolved<'t>(&self, node: Node<'t>) -> Node<'t> {
        match self {
            Pattern::Node { kind, .. } if !kind.starts_with("parenthesized_") => {
                syntax::unparen(node)
            }
            _ => node,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Any => write!(f, "_"),
            Pattern::Node { kind, text, fields } => {
                write!(f, "({kind}")?;
                if let Some(text) = text {
                    write!(f, " {text:?}")?;
                }
                for (name, pattern) in fields {
                    write!(f, " {name}: {pattern}")?;
                }
                write!(f, ")")
            }
            Pattern::Alt(alternatives) => {
                write!(f, "[")?;
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{alt}")?;
                }
                write!(f, "]")
            }
            Pattern::Capture(inner, name) => write!(f, "{inner} @{name}"),
        }
    }
}
