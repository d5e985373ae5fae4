//! Per-function analysis: signature plus the descriptors found in the body.

use arborium_tree_sitter::Node;
use goatherd_core::FunctionRef;
use goatherd_core::utils::go_quote;
use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;

use crate::chain::{FluentChain, parse_fluent_chain};
use crate::descriptor::{
    ActionDescriptor, Entry, FlagDescriptor, is_descriptor, parse_action_descriptor,
    parse_flag_descriptor,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::program::Program;
use crate::resolve::{Resolver, Symbol};
use crate::signature::{FunctionSignature, parse_signature};
use crate::source_map::Span;
use crate::walk::find_pruned;
use crate::{Config, Error, FatalKind, Result, syntax};

/// Everything known about one action function before model building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionAnalysis {
    pub signature: FunctionSignature,
    /// The `Self` descriptor, or the doc comment when the body has none.
    pub action: Option<ActionDescriptor>,
    /// Flag descriptors in source order, one per parameter at most.
    pub flags: Vec<FlagDescriptor>,
}

/// Analyze the function `function`, registered at `registered_at`.
pub fn analyze_function(
    program: &Program,
    function: &FunctionRef,
    registered_at: Span,
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Result<FunctionAnalysis> {
    let Some((id, decl)) = program.function_declaration(function) else {
        return Err(Error::fatal(
            program.sources(),
            FatalKind::DeclarationNotFound,
            registered_at,
            format!("failed to find the declaration of `{function}`"),
        ));
    };
    let resolver = Resolver::new(program, id);
    let signature = parse_signature(decl, &resolver, diagnostics)?;

    let (action, flags) = match decl.child_by_field_name("body") {
        Some(body) => (
            find_action_descriptor(body, &resolver, config, diagnostics),
            find_flag_descriptors(body, &signature, &resolver, config, diagnostics),
        ),
        None => (None, Vec::new()),
    };

    let action = action.or_else(|| {
        let doc = syntax::doc_comment(decl, resolver.source())?;
        let doc = doc.strip_prefix(signature.name.as_str()).unwrap_or(&doc);
        Some(ActionDescriptor {
            name: None,
            usage: Some(go_quote(doc.trim())),
            span: None,
        })
    });

    tracing::debug!(
        %function,
        params = signature.params.len(),
        flags = flags.len(),
        described = action.is_some(),
        "analyzed function"
    );

    Ok(FunctionAnalysis {
        signature,
        action,
        flags,
    })
}

fn descriptor_chains<'t>(
    body: Node<'t>,
    entry: Entry,
    resolver: &Resolver<'_>,
    config: &Config,
) -> Vec<FluentChain<'t>> {
    find_pruned(body, |node| {
        if node.kind() != "call_expression" {
            return None;
        }
        parse_fluent_chain(node, resolver.source())
            .filter(|chain| is_descriptor(chain, entry, resolver, config))
    })
    .collect()
}

/// The first `Self` descriptor of the body. Later ones are reported and ignored.
fn find_action_descriptor(
    body: Node<'_>,
    resolver: &Resolver<'_>,
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Option<ActionDescriptor> {
    let chains = descriptor_chains(body, Entry::Action, resolver, config);
    let (first, rest) = chains.split_first()?;
    let first_span = resolver.span(first.root());
    for chain in rest {
        diagnostics
            .report(DiagnosticKind::DuplicateSelfDescriptor, resolver.span(chain.root()))
            .related_to("first described here", first_span)
            .emit();
    }
    Some(parse_action_descriptor(first, resolver, diagnostics))
}

/// `Flag` descriptors of the body, checked against the signature.
fn find_flag_descriptors(
    body: Node<'_>,
    signature: &FunctionSignature,
    resolver: &Resolver<'_>,
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Vec<FlagDescriptor> {
    let mut by_param: IndexMap<usize, FlagDescriptor> = IndexMap::new();

    for chain in descriptor_chains(body, Entry::Flag, resolver, config) {
        let Some(mut descriptor) = parse_flag_descriptor(&chain, resolver, diagnostics) else {
            continue;
        };
        if descriptor.ty.is_none() {
            // already reported as untyped
            continue;
        }

        // same declaration, not just the same name: function literals may shadow
        let target = syntax::unparen(chain.calls[0].args[0]);
        let index = match resolver.resolve(target) {
            Symbol::Param { decl, .. } => signature.params.iter().position(|p| p.span == decl),
            _ => None,
        };
        let Some(index) = index else {
            diagnostics
                .report(DiagnosticKind::UnknownFlagTarget, descriptor.target_span)
                .message(&descriptor.target)
                .emit();
            continue;
        };
        descriptor.param = Some(index);

        match by_param.entry(index) {
            MapEntry::Occupied(first) => {
                diagnostics
                    .report(DiagnosticKind::DuplicateFlagDescriptor, descriptor.target_span)
                    .message(&descriptor.target)
                    .related_to("first described here", first.get().target_span)
                    .emit();
            }
            MapEntry::Vacant(slot) => {
                slot.insert(descriptor);
            }
        }
    }

    by_param.into_values().collect()
}
