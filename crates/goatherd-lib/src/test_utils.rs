//! Test-only helpers shared by the analysis tests.

use arborium_tree_sitter::Node;

use crate::program::{FileId, Program};
use crate::resolve::Resolver;
use crate::walk::descendants_of_kind;
use crate::{Config, Error};

pub const ROOT: &str = "example.com/app";

/// Program with a single `main.go` in the root package.
pub fn program(source: &str) -> Program {
    Program::builder(ROOT)
        .file("main.go", source)
        .build()
        .expect("test program should load")
}

pub fn main_file() -> FileId {
    FileId {
        package: 0,
        file: 0,
    }
}

pub fn resolver(program: &Program) -> Resolver<'_> {
    Resolver::new(program, main_file())
}

/// Every call expression of `main.go`, outermost first.
pub fn calls(program: &Program) -> Vec<Node<'_>> {
    descendants_of_kind(program.file(main_file()).root(), "call_expression").collect()
}

/// First node of `kind` whose text is `text`.
pub fn node_with_text<'p>(program: &'p Program, kind: &'static str, text: &str) -> Node<'p> {
    let source = program.source(main_file());
    descendants_of_kind(program.file(main_file()).root(), kind)
        .find(|n| &source[n.byte_range()] == text)
        .unwrap_or_else(|| panic!("no {kind} with text {text:?}"))
}

/// Last node of `kind` whose text is `text`; usually a use rather than the declaration.
pub fn last_node_with_text<'p>(program: &'p Program, kind: &'static str, text: &str) -> Node<'p> {
    let source = program.source(main_file());
    descendants_of_kind(program.file(main_file()).root(), kind)
        .filter(|n| &source[n.byte_range()] == text)
        .last()
        .unwrap_or_else(|| panic!("no {kind} with text {text:?}"))
}

/// The generated model as pretty JSON.
pub fn model_json(source: &str) -> String {
    let program = program(source);
    let generated = crate::generate(&program, &Config::default()).unwrap_or_else(|err| {
        panic!("generation failed: {}", describe_error(&program, &err))
    });
    serde_json::to_string_pretty(&generated.generation).expect("model serializes")
}

/// The error generation fails with, diagnostics rendered one per line.
pub fn generation_error(source: &str) -> String {
    let program = program(source);
    match crate::generate(&program, &Config::default()) {
        Ok(_) => panic!("generation should fail"),
        Err(err) => describe_error(&program, &err),
    }
}

fn describe_error(program: &Program, err: &Error) -> String {
    match err {
        Error::Analysis(diagnostics) => format!(
            "{}\n{}",
            err,
            diagnostics
                .printer(program.sources())
                .snippets(false)
                .render()
                .trim_end()
        ),
        other => other.to_string(),
    }
}
