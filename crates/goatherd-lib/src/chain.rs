//! Fluent call chains: `base.A(x).B(y).C()`.

use std::sync::LazyLock;

use arborium_tree_sitter::Node;

use crate::matcher::Pattern;
use crate::syntax;

/// One call of a chain, in evaluation order.
#[derive(Debug, Clone)]
pub struct FluentCall<'t> {
    pub name: String,
    /// The method identifier, for diagnostics.
    pub method: Node<'t>,
    /// Unevaluated arguments.
    pub args: Vec<Node<'t>>,
    /// The whole call expression up to and including this call.
    pub call: Node<'t>,
}

/// A base expression followed by at least one method call.
#[derive(Debug, Clone)]
pub struct FluentChain<'t> {
    pub base: Node<'t>,
    /// Index 0 is the call applied directly to `base`.
    pub calls: Vec<FluentCall<'t>>,
}

impl<'t> FluentChain<'t> {
    /// The outermost call expression.
    pub fn root(&self) -> Node<'t> {
        self.calls
            .last()
            .map(|c| c.call)
            .expect("a chain has at least one call")
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().map(|c| c.name.as_str())
    }
}

/// `(call_expression function: (selector_expression operand: _ @operand field: (field_identifier) @method) arguments: (argument_list) @args)`
static STEP: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::node("call_expression")
        .field(
            "function",
            Pattern::node("selector_expression")
                .field("operand", Pattern::Any.capture("operand"))
                .field("field", Pattern::node("field_identifier").capture("method")),
        )
        .field("arguments", Pattern::node("argument_list").capture("args"))
});

/// Decompose a call expression into a fluent chain.
///
/// Returns `None` for anything that is not a chain: a plain function call,
/// a call on a computed function value, or a chain whose inner link is not
/// itself a method call.
pub fn parse_fluent_chain<'t>(call: Node<'t>, source: &str) -> Option<FluentChain<'t>> {
    let mut calls = Vec::new();
    let mut current = call;

    let base = loop {
        let captures = STEP.matches(current, source)?;
        let method = captures["method"];
        calls.push(FluentCall {
            name: syntax::text(method, source).to_owned(),
            method,
            args: syntax::children(captures["args"]),
            call: syntax::unparen(current),
        });

        let operand = captures["operand"];
        if operand.kind() != "call_expression" {
            break operand;
        }
        current = operand;
    };

    calls.reverse();
    Some(FluentChain { base, calls })
}
