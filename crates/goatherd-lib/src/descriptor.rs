//! Flag and action descriptors.
//!
//! Descriptors are fluent chains rooted at the library package:
//!
//! ```go
//! goat.Flag(name).Name("who").Usage("who to greet").Default("world")
//! goat.Self().Name("greet").Usage("Greets someone")
//! ```
//!
//! Recognizing a chain is a plain yes/no question. Once a chain is
//! recognized, problems inside it are reported as diagnostics and parsing
//! continues with what is left.

use arborium_tree_sitter::Node;

use crate::Config;
use crate::chain::{FluentCall, FluentChain};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::resolve::{Resolver, Symbol};
use crate::source_map::Span;
use crate::syntax;

/// Entry point a descriptor chain starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// `goat.Flag(param)`
    Flag,
    /// `goat.Self()`
    Action,
}

impl Entry {
    pub fn method(self) -> &'static str {
        match self {
            Entry::Flag => "Flag",
            Entry::Action => "Self",
        }
    }

    fn arity(self) -> usize {
        match self {
            Entry::Flag => 1,
            Entry::Action => 0,
        }
    }

    fn allows(self, directive: Directive) -> bool {
        match self {
            Entry::Flag => true,
            Entry::Action => directive != Directive::Default,
        }
    }

    fn vocabulary(self) -> &'static str {
        match self {
            Entry::Flag => "flag descriptors accept `Name`, `Usage` and `Default`",
            Entry::Action => "action descriptors accept `Name` and `Usage`",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Name,
    Usage,
    Default,
}

impl Directive {
    fn from_method(name: &str) -> Option<Self> {
        match name {
            "Name" => Some(Directive::Name),
            "Usage" => Some(Directive::Usage),
            "Default" => Some(Directive::Default),
            _ => None,
        }
    }
}

/// Describes one parameter of the enclosing function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDescriptor {
    /// Source text of the described argument; the parameter lookup key.
    pub target: String,
    pub target_span: Span,
    /// Printed type of the target, when known.
    pub ty: Option<String>,
    /// Position of the described parameter in the signature, once matched.
    pub param: Option<usize>,
    pub name: Option<String>,
    pub usage: Option<String>,
    pub default: Option<String>,
    /// The whole chain.
    pub span: Span,
}

/// Describes the enclosing function itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub name: Option<String>,
    pub usage: Option<String>,
    /// The whole chain; `None` when the descriptor did not come from source.
    pub span: Option<Span>,
}

/// Whether `chain` starts at the library package with the `entry` call.
///
/// The base must resolve to the library import, so aliased imports work and
/// a local variable that happens to be called `goat` does not.
pub fn is_descriptor(chain: &FluentChain<'_>, entry: Entry, resolver: &Resolver<'_>, config: &Config) -> bool {
    let base = syntax::unparen(chain.base);
    if base.kind() != "identifier" || chain.calls[0].name != entry.method() {
        return false;
    }
    matches!(resolver.resolve(base), Symbol::Package(path) if path == config.library_path)
}

/// Parse a recognized `Flag` chain.
///
/// Returns `None` when the chain names no target at all.
pub fn parse_flag_descriptor(
    chain: &FluentChain<'_>,
    resolver: &Resolver<'_>,
    diagnostics: &mut Diagnostics,
) -> Option<FlagDescriptor> {
    let entry = &chain.calls[0];
    check_entry_arity(entry, Entry::Flag, resolver, diagnostics);
    let target = syntax::unparen(*entry.args.first()?);

    let ty = resolver.type_of(target);
    if ty.is_none() {
        diagnostics
            .report(DiagnosticKind::UntypedFlagTarget, resolver.span(target))
            .message(resolver.text(target))
            .emit();
    }

    let directives = parse_directives(chain, Entry::Flag, resolver, diagnostics);
    Some(FlagDescriptor {
        target: resolver.text(target).to_owned(),
        target_span: resolver.span(target),
        ty,
        param: None,
        name: directives.name,
        usage: directives.usage,
        default: directives.default,
        span: resolver.span(chain.root()),
    })
}

/// Parse a recognized `Self` chain.
pub fn parse_action_descriptor(
    chain: &FluentChain<'_>,
    resolver: &Resolver<'_>,
    diagnostics: &mut Diagnostics,
) -> ActionDescriptor {
    check_entry_arity(&chain.calls[0], Entry::Action, resolver, diagnostics);
    let directives = parse_directives(chain, Entry::Action, resolver, diagnostics);
    ActionDescriptor {
        name: directives.name,
        usage: directives.usage,
        span: Some(resolver.span(chain.root())),
    }
}

fn check_entry_arity(call: &FluentCall<'_>, entry: Entry, resolver: &Resolver<'_>, diagnostics: &mut Diagnostics) {
    if call.args.len() == entry.arity() {
        return;
    }
    let expected = match entry.arity() {
        0 => "no arguments".to_owned(),
        1 => "exactly one argument".to_owned(),
        n => format!("{n} arguments"),
    };
    diagnostics
        .report(DiagnosticKind::DirectiveArity, resolver.span(call.method))
        .message(format!(
            "`{}` takes {expected}, found {}",
            entry.method(),
            call.args.len()
        ))
        .emit();
}

#[derive(Default)]
struct Directives<'t> {
    name: Option<String>,
    usage: Option<String>,
    default: Option<String>,
    seen: Vec<(Directive, Node<'t>)>,
}

impl<'t> Directives<'t> {
    fn slot(&mut self, directive: Directive) -> &mut Option<String> {
        match directive {
            Directive::Name => &mut self.name,
            Directive::Usage => &mut self.usage,
            Directive::Default => &mut self.default,
        }
    }
}

fn parse_directives<'t>(
    chain: &FluentChain<'t>,
    entry: Entry,
    resolver: &Resolver<'_>,
    diagnostics: &mut Diagnostics,
) -> Directives<'t> {
    let mut directives = Directives::default();

    for call in &chain.calls[1..] {
        let method_span = resolver.span(call.method);
        let Some(directive) = Directive::from_method(&call.name).filter(|d| entry.allows(*d)) else {
            diagnostics
                .report(DiagnosticKind::UnknownDirective, method_span)
                .message(&call.name)
                .hint(entry.vocabulary())
                .emit();
            continue;
        };

        if let Some((_, first)) = directives.seen.iter().find(|(d, _)| *d == directive) {
            diagnostics
                .report(DiagnosticKind::DuplicateDirective, method_span)
                .message(&call.name)
                .related_to("first specified here", resolver.span(*first))
                .emit();
            continue;
        }
        directives.seen.push((directive, call.method));

        if call.args.len() != 1 {
            diagnostics
                .report(DiagnosticKind::DirectiveArity, method_span)
                .message(format!(
                    "`{}` takes exactly one argument, found {}",
                    call.name,
                    call.args.len()
                ))
                .emit();
        }
        if let Some(value) = call.args.first() {
            *directives.slot(directive) = Some(resolver.text(*value).to_owned());
        }
    }

    directives
}
