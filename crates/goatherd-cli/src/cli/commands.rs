//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! Running without a subcommand generates the model for the current
//! directory with default options.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("goatherd")
        .about("Derive CLI bindings from goat action functions")
        .after_help(
            r#"EXAMPLES:
  goatherd                          # model of the package in the current directory
  goatherd model ./cmd/tool -o model.json
  goatherd check --strict
  goatherd tree main.go --spans"#,
        )
        .arg(library_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .subcommand(model_command())
        .subcommand(check_command())
        .subcommand(tree_command())
}

/// Analyze a package and print the action model.
pub fn model_command() -> Command {
    Command::new("model")
        .about("Analyze a package and print the action model as JSON")
        .after_help(
            r#"EXAMPLES:
  goatherd model                    # current directory
  goatherd model ./cmd/tool         # another package
  goatherd model -o model.json      # write to file
  goatherd model --compact          # single-line JSON"#,
        )
        .arg(dir_arg())
        .arg(output_file_arg())
        .arg(compact_arg())
}

/// Analyze a package and report diagnostics only.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Analyze a package and report problems")
        .after_help(
            r#"EXAMPLES:
  goatherd check                    # silent on success
  goatherd check ./cmd/tool --strict"#,
        )
        .arg(dir_arg())
        .arg(strict_arg())
}

/// Dump the tree-sitter tree of a Go file.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Show the syntax tree of a Go source file")
        .after_help(
            r#"EXAMPLES:
  goatherd tree main.go             # named nodes
  goatherd tree main.go --raw       # include anonymous nodes
  goatherd tree main.go --spans     # with positions"#,
        )
        .arg(source_path_arg())
        .arg(raw_arg())
        .arg(spans_arg())
}
