//! Registration calls: `goat.Run(f)`, `goat.RunE(f)` and `goat.Command(f, ...)`.

use std::fmt;
use std::sync::LazyLock;

use arborium_tree_sitter::Node;
use goatherd_core::FunctionRef;

use crate::matcher::Pattern;
use crate::program::Program;
use crate::resolve::{Resolver, Symbol};
use crate::source_map::Span;
use crate::walk::descendants_of_kind;
use crate::{Config, Error, FatalKind, Result, syntax};

/// Library function marking a function as CLI-invokable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Run,
    RunE,
    Command,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 3] = [EntryPoint::Run, EntryPoint::RunE, EntryPoint::Command];

    pub fn name(self) -> &'static str {
        match self {
            EntryPoint::Run => "Run",
            EntryPoint::RunE => "RunE",
            EntryPoint::Command => "Command",
        }
    }

    /// Whether a call with `count` arguments has the expected shape.
    ///
    /// `Run` and `RunE` take the function alone; `Command` takes the function
    /// first, optionally followed by subcommands.
    pub fn accepts_arity(self, count: usize) -> bool {
        match self {
            EntryPoint::Run | EntryPoint::RunE => count == 1,
            EntryPoint::Command => count >= 1,
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "goat.{}", self.name())
    }
}

/// A resolved registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub entry: EntryPoint,
    pub function: FunctionRef,
    /// Source text of the function argument (`hello`, `cmds.Hello`).
    pub reference: String,
    pub call: Span,
    pub target: Span,
}

/// `[(identifier) @func (selector_expression operand: (identifier) @package field: (field_identifier) @func)]`
static TARGET: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::Alt(vec![
        Pattern::node("identifier").capture("func"),
        Pattern::node("selector_expression")
            .field("operand", Pattern::node("identifier").capture("package"))
            .field("field", Pattern::node("field_identifier").capture("func")),
    ])
});

/// Which entry point `call` targets, resolved through imports and shadowing.
pub fn entry_point_of(call: Node<'_>, resolver: &Resolver<'_>, config: &Config) -> Option<EntryPoint> {
    let function = call.child_by_field_name("function")?;
    let symbol = resolver.resolve(function);
    EntryPoint::ALL
        .into_iter()
        .find(|entry| symbol.is_function(&config.library_path, entry.name()))
}

/// Find every registration call in the root package.
///
/// Nested calls are visited too, since subcommands are registered inside
/// other registration calls.
pub fn find_registrations(program: &Program, config: &Config) -> Result<Vec<Registration>> {
    let mut registrations = Vec::new();

    for id in program.files(0) {
        let resolver = Resolver::new(program, id);
        for call in descendants_of_kind(program.file(id).root(), "call_expression") {
            let Some(entry) = entry_point_of(call, &resolver, config) else {
                continue;
            };
            let args = call
                .child_by_field_name("arguments")
                .map(syntax::children)
                .unwrap_or_default();
            if !entry.accepts_arity(args.len()) {
                tracing::debug!(%entry, args = args.len(), "skipping call with unexpected arity");
                continue;
            }

            let registration = resolve_target(entry, call, args[0], &resolver)?;
            tracing::debug!(
                %entry,
                function = %registration.function,
                "found registration"
            );
            registrations.push(registration);
        }
    }

    Ok(registrations)
}

fn resolve_target(
    entry: EntryPoint,
    call: Node<'_>,
    target: Node<'_>,
    resolver: &Resolver<'_>,
) -> Result<Registration> {
    let sources = resolver.program().sources();
    let target = syntax::unparen(target);
    let span = resolver.span(target);

    let Some(captures) = TARGET.matches(target, resolver.source()) else {
        return Err(Error::fatal(
            sources,
            FatalKind::UnsupportedTarget,
            span,
            format!("{entry} only accepts free functions"),
        ));
    };

    if let Some(package) = captures.get("package")
        && !matches!(resolver.resolve(*package), Symbol::Package(_))
    {
        return Err(Error::fatal(
            sources,
            FatalKind::UnsupportedTarget,
            span,
            format!("{entry} only accepts free functions, not methods"),
        ));
    }

    let function = match resolver.resolve(target) {
        Symbol::Func(function) => function,
        Symbol::External { package, name } => {
            return Err(Error::fatal(
                sources,
                FatalKind::DeclarationNotFound,
                span,
                format!("cannot analyze `{name}`: package {package} is outside the module"),
            ));
        }
        _ => {
            return Err(Error::fatal(
                sources,
                FatalKind::NotAFunction,
                span,
                format!("{entry} expects a function"),
            ));
        }
    };

    Ok(Registration {
        entry,
        function,
        reference: resolver.text(target).to_owned(),
        call: resolver.span(call),
        target: span,
    })
}
