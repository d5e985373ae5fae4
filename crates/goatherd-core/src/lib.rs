#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the goatherd action model.
//!
//! Two layers:
//! - **Model layer**: normalized `Action`/`Flag` records consumed by code emitters
//! - **Registry layer**: `ActionRegistry`, the per-run mapping from a function
//!   reference to its action
//!
//! All textual fields holding names, usages and defaults are Go source text,
//! ready to be re-emitted verbatim (`"name"`, not `name`).

use std::fmt;

use serde::Serialize;

mod flag_kind;
mod registry;
pub mod utils;


pub use flag_kind::{FlagHandler, FlagKind};
pub use registry::{ActionRegistry, Generation, PackageInfo};

// ============================================================================
// Function identity
// ============================================================================

/// Canonical identity of a package-level Go function.
///
/// Two references to the same function through different import aliases
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FunctionRef {
    pub package: String,
    pub name: String,
}

impl FunctionRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

// ============================================================================
// Flags
// ============================================================================

/// Default value of a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagDefault {
    /// No default was described; the flag must be supplied.
    Required,
    /// Go source text of the default expression.
    Value(String),
}

impl FlagDefault {
    pub fn is_required(&self) -> bool {
        matches!(self, FlagDefault::Required)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            FlagDefault::Required => None,
            FlagDefault::Value(v) => Some(v),
        }
    }
}

/// A normalized CLI flag derived from one function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flag {
    /// Name of the parameter the flag binds to.
    pub param: String,
    /// Go type of the parameter, as printed by the type checker.
    #[serde(rename = "type")]
    pub ty: String,
    pub kind: FlagKind,
    /// Display name, as Go source text.
    pub name: String,
    /// Usage text, as Go source text.
    pub usage: String,
    pub default: FlagDefault,
}

impl Flag {
    /// Whether the generated CLI must reject invocations that omit this flag.
    ///
    /// Optional-by-type kinds (pointers, `bool`) are never required.
    pub fn is_required(&self) -> bool {
        self.default.is_required() && !self.kind.handler().optional
    }
}

/// One positional argument of an action function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Argument {
    /// The execution-context parameter. Never exposed as a flag.
    Context { param: String },
    Flag(Flag),
}

impl Argument {
    pub fn param(&self) -> &str {
        match self {
            Argument::Context { param } => param,
            Argument::Flag(flag) => &flag.param,
        }
    }

    pub fn as_flag(&self) -> Option<&Flag> {
        match self {
            Argument::Context { .. } => None,
            Argument::Flag(flag) => Some(flag),
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// A normalized CLI-invokable function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub function: FunctionRef,
    /// Source text the function was registered with (`hello`, `cmds.Hello`).
    pub reference: String,
    /// Command name, as Go source text.
    pub name: String,
    /// Usage text, as Go source text.
    pub usage: String,
    /// The function returns a single `error`.
    pub returns_error: bool,
    /// Arguments in parameter order. Generated call sites rely on this order.
    pub arguments: Vec<Argument>,
}

impl Action {
    /// Flags in parameter order, without the context parameter.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.arguments.iter().filter_map(Argument::as_flag)
    }

    pub fn takes_context(&self) -> bool {
        self.arguments
            .iter()
            .any(|a| matches!(a, Argument::Context { .. }))
    }
}
