//! Action function signatures.

use std::sync::LazyLock;

use arborium_tree_sitter::Node;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::matcher::Pattern;
use crate::resolve::Resolver;
use crate::source_map::Span;
use crate::{Error, FatalKind, Result, syntax};

/// `_`: declares a parameter without a usable name.
static BLANK: LazyLock<Pattern> = LazyLock::new(|| Pattern::node("identifier").text("_"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Printed type (`string`, `*github.com/tmr232/goat.Context`).
    pub ty: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// The function returns a single `error`; otherwise it returns nothing.
    pub returns_error: bool,
}

/// Read the signature of a `function_declaration`.
///
/// Unnamed and blank (`_`) parameters are reported and kept with an empty
/// name so later stages still see every position. Type parameters and result lists other
/// than nothing or a single `error` are fatal.
pub fn parse_signature(
    decl: Node<'_>,
    resolver: &Resolver<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<FunctionSignature> {
    let sources = resolver.program().sources();
    let name_node = decl
        .child_by_field_name("name")
        .unwrap_or(decl);
    let name = resolver.text(name_node).to_owned();

    if let Some(type_params) = decl.child_by_field_name("type_parameters") {
        return Err(Error::fatal(
            sources,
            FatalKind::GenericAction,
            resolver.span(type_params),
            format!("action function `{name}` cannot have type parameters"),
        ));
    }

    let returns_error = match decl.child_by_field_name("result") {
        None => false,
        Some(result) => {
            let types: Vec<String> = if result.kind() == "parameter_list" {
                syntax::parameters(result)
                    .iter()
                    .map(|p| resolver.parameter_type(p))
                    .collect()
            } else {
                vec![resolver.qualify_type(result)]
            };
            match types.as_slice() {
                [] => false,
                [ty] if ty == "error" => true,
                _ => {
                    return Err(Error::fatal(
                        sources,
                        FatalKind::UnsupportedResults,
                        resolver.span(result),
                        format!(
                            "action function `{name}` must return nothing or a single error, not `{}`",
                            resolver.text(result)
                        ),
                    ));
                }
            }
        }
    };

    let mut params = Vec::new();
    if let Some(list) = decl.child_by_field_name("parameters") {
        for param in syntax::parameters(list) {
            let ty = resolver.parameter_type(&param);
            let (param_name, span) = match param.name {
                Some(ident) if BLANK.matches(ident, resolver.source()).is_none() => {
                    (resolver.text(ident).to_owned(), resolver.span(ident))
                }
                _ => {
                    diagnostics
                        .report(DiagnosticKind::UnnamedParameter, resolver.span(param.decl))
                        .message(format!("`{ty}` in `{name}`"))
                        .emit();
                    (String::new(), resolver.span(param.decl))
                }
            };
            params.push(Param {
                name: param_name,
                ty,
                span,
            });
        }
    }

    Ok(FunctionSignature {
        name,
        params,
        returns_error,
    })
}
