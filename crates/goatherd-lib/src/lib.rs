//! Goatherd: static analysis that turns annotated Go functions into CLI actions.
//!
//! # Example
//!
//! ```
//! use goatherd_lib::{Config, Program};
//!
//! let program = Program::builder("example.com/app")
//!     .file(
//!         "main.go",
//!         r#"package main
//!
//! import "github.com/tmr232/goat"
//!
//! func hello(name string) {
//!     goat.Flag(name).Usage("who to greet")
//! }
//!
//! func main() { goat.Run(hello) }
//! "#,
//!     )
//!     .build()
//!     .expect("valid program");
//!
//! let generated = goatherd_lib::generate(&program, &Config::default()).expect("analysis succeeds");
//! assert_eq!(generated.generation.actions.len(), 1);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;

pub mod analyzer;
pub mod chain;
pub mod descriptor;
pub mod diagnostics;
pub mod finder;
pub mod generate;
pub mod matcher;
pub mod model;
pub mod program;
pub mod resolve;
pub mod signature;
pub mod source_map;
pub mod syntax;
pub mod walk;

#[cfg(test)]
mod generate_tests;
#[cfg(test)]
mod matcher_tests;
#[cfg(test)]
mod signature_tests;
#[cfg(test)]
pub(crate) mod test_utils;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use generate::{Generated, generate};
pub use program::Program;
pub use source_map::{Location, SourceMap, Span};

/// Import path of the declarative library the analyzed code calls into.
pub const DEFAULT_LIBRARY_PATH: &str = "github.com/tmr232/goat";

/// Name of the library's execution context type.
pub const DEFAULT_CONTEXT_TYPE: &str = "Context";

/// Analysis settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Import path of the library providing `Run`, `Command`, `Flag` and `Self`.
    pub library_path: String,
    /// Context type declared by the library. Parameters of type `*<library>.<name>`
    /// receive the execution context instead of a flag.
    pub context_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: DEFAULT_LIBRARY_PATH.to_owned(),
            context_type: DEFAULT_CONTEXT_TYPE.to_owned(),
        }
    }
}

impl Config {
    pub fn with_library(mut self, path: impl Into<String>) -> Self {
        self.library_path = path.into();
        self
    }

    /// Printed type of the context parameter (`*github.com/tmr232/goat.Context`).
    pub fn context_type_string(&self) -> String {
        format!("*{}.{}", self.library_path, self.context_type)
    }
}

/// Contract violations that make generation meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalKind {
    /// The registered expression is not a plain function reference.
    UnsupportedTarget,
    /// The registered reference does not resolve to a function.
    NotAFunction,
    /// The function's declaration could not be found.
    DeclarationNotFound,
    /// The function returns something other than nothing or a single `error`.
    UnsupportedResults,
    /// The function has type parameters.
    GenericAction,
}

/// Errors that can occur while loading or analyzing a program.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no Go source files in {}", .0.display())]
    NoSources(PathBuf),

    #[error("expected 1 package, found {}", .0.len())]
    PackageCount(Vec<String>),

    #[error("{location}: syntax error")]
    Syntax { location: Location },

    #[error("{location}: {message}")]
    Fatal {
        kind: FatalKind,
        span: Span,
        location: Location,
        message: String,
    },

    #[error("analysis failed with {} errors", .0.error_count())]
    Analysis(Diagnostics),
}

impl Error {
    pub(crate) fn fatal(
        sources: &SourceMap,
        kind: FatalKind,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Error::Fatal {
            kind,
            span,
            location: sources.location(span),
            message: message.into(),
        }
    }
}

/// Result type for loading and analysis.
pub type Result<T> = std::result::Result<T, Error>;
