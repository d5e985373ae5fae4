//! Merging signatures and descriptors into `Action` records.

use goatherd_core::utils::{EMPTY_STRING_LITERAL, go_quote};
use goatherd_core::{Action, Argument, Flag, FlagDefault, FlagKind, FunctionRef};

use crate::Config;
use crate::descriptor::{ActionDescriptor, FlagDescriptor};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::signature::FunctionSignature;

/// Build the normalized action for one function.
///
/// Every parameter starts from its signature-derived flag (quoted parameter
/// name, empty usage, required), descriptors override what they specify, and
/// the result is laid out in parameter order. A descriptor applies to the
/// parameter position it was matched to. Context parameters become
/// `Argument::Context` and are never flags.
///
/// Returns `None` when a parameter type has no flag handler; the problem is
/// reported to `diagnostics`.
pub fn build_action(
    function: &FunctionRef,
    reference: &str,
    signature: &FunctionSignature,
    action: Option<&ActionDescriptor>,
    flags: &[FlagDescriptor],
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Option<Action> {
    let context_type = config.context_type_string();

    // one slot per parameter; `None` marks an unsupported type
    let mut arguments: Vec<Option<Argument>> = signature
        .params
        .iter()
        .map(|param| {
            if param.ty == context_type {
                return Some(Argument::Context {
                    param: param.name.clone(),
                });
            }
            let Some(kind) = FlagKind::from_go_type(&param.ty) else {
                diagnostics
                    .report(DiagnosticKind::UnsupportedFlagType, param.span)
                    .message(&param.ty)
                    .hint(format!(
                        "supported types: {}",
                        FlagKind::supported_types().collect::<Vec<_>>().join(", ")
                    ))
                    .emit();
                return None;
            };
            Some(Argument::Flag(Flag {
                param: param.name.clone(),
                ty: param.ty.clone(),
                kind,
                name: go_quote(&param.name),
                usage: EMPTY_STRING_LITERAL.to_owned(),
                default: FlagDefault::Required,
            }))
        })
        .collect();

    for descriptor in flags {
        if descriptor.ty.as_deref() == Some(context_type.as_str()) {
            continue;
        }
        let slot = descriptor.param.and_then(|index| arguments.get_mut(index));
        let Some(Some(Argument::Flag(flag))) = slot else {
            continue;
        };
        if let Some(name) = &descriptor.name {
            flag.name = name.clone();
        }
        if let Some(usage) = &descriptor.usage {
            flag.usage = usage.clone();
        }
        if let Some(default) = &descriptor.default {
            flag.default = FlagDefault::Value(default.clone());
        }
    }

    let arguments = arguments.into_iter().collect::<Option<Vec<_>>>()?;

    Some(Action {
        function: function.clone(),
        reference: reference.to_owned(),
        name: action
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| go_quote(&signature.name)),
        usage: action
            .and_then(|a| a.usage.clone())
            .unwrap_or_else(|| EMPTY_STRING_LITERAL.to_owned()),
        returns_error: signature.returns_error,
        arguments,
    })
}
