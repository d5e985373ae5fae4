//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Global options reach subcommand matches
//! 2. Running without a subcommand behaves like `model .`
//! 3. Help visibility: the top level only offers global options
//! 4. Params extraction and conversion into command args

use std::path::PathBuf;

use goatherd_lib::DEFAULT_LIBRARY_PATH;

use super::*;
use crate::commands::check::CheckArgs;
use crate::commands::model::ModelArgs;
use crate::commands::tree::TreeArgs;

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = build_cli()
        .try_get_matches_from(args)
        .unwrap_or_else(|err| panic!("{args:?} should parse: {err}"));
    let (_, sub) = matches.subcommand().expect("subcommand");
    sub.clone()
}

#[test]
fn model_params() {
    let m = sub_matches(&["goatherd", "model", "./cmd/tool", "-o", "model.json", "--compact"]);
    let params = ModelParams::from_matches(&m);

    assert_eq!(params.dir, PathBuf::from("./cmd/tool"));
    assert_eq!(params.output, Some(PathBuf::from("model.json")));
    assert!(params.compact);
    assert_eq!(params.library, None);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn model_dir_defaults_to_current() {
    let m = sub_matches(&["goatherd", "model"]);
    let params = ModelParams::from_matches(&m);

    assert_eq!(params.dir, PathBuf::from("."));
    assert_eq!(params.output, None);
    assert!(!params.compact);
}

#[test]
fn global_options_after_subcommand() {
    let m = sub_matches(&[
        "goatherd",
        "check",
        "--library",
        "example.com/goat",
        "--color",
        "never",
    ]);
    let args: CheckArgs = CheckParams::from_matches(&m).into();

    assert_eq!(args.config.library_path, "example.com/goat");
    assert_eq!(args.config.context_type_string(), "*example.com/goat.Context");
    assert!(!args.color);
}

#[test]
fn global_options_before_subcommand() {
    let m = sub_matches(&["goatherd", "--color", "always", "model", "pkg"]);
    let args: ModelArgs = ModelParams::from_matches(&m).into();

    assert!(args.color);
    assert_eq!(args.dir, PathBuf::from("pkg"));
    assert_eq!(args.config.library_path, DEFAULT_LIBRARY_PATH);
}

#[test]
fn check_params() {
    let m = sub_matches(&["goatherd", "check", "pkg", "--strict"]);
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.dir, PathBuf::from("pkg"));
    assert!(params.strict);
}

#[test]
fn check_rejects_model_flags() {
    let result = build_cli().try_get_matches_from(["goatherd", "check", "--compact"]);
    assert!(result.is_err());
}

#[test]
fn no_subcommand_is_model_of_current_dir() {
    let matches = build_cli()
        .try_get_matches_from(["goatherd", "--library", "x/goat", "--color", "never"])
        .unwrap();
    assert!(matches.subcommand().is_none());

    let args: ModelArgs = ModelParams::defaults(&matches).into();
    assert_eq!(args.dir, PathBuf::from("."));
    assert_eq!(args.output, None);
    assert!(!args.compact);
    assert!(!args.color);
    assert_eq!(args.config.library_path, "x/goat");
}

#[test]
fn model_flags_need_the_subcommand() {
    let result = build_cli().try_get_matches_from(["goatherd", "--compact"]);
    assert!(result.is_err());
}

#[test]
fn tree_requires_file() {
    let result = build_cli().try_get_matches_from(["goatherd", "tree"]);
    assert!(result.is_err());
}

#[test]
fn tree_params() {
    let m = sub_matches(&["goatherd", "tree", "main.go", "--raw", "--spans"]);
    let args: TreeArgs = TreeParams::from_matches(&m).into();

    assert_eq!(args.source_path, PathBuf::from("main.go"));
    assert!(args.raw);
    assert!(args.spans);
}

#[test]
fn verbose_is_counted() {
    let matches = build_cli()
        .try_get_matches_from(["goatherd", "-vv", "check"])
        .unwrap();
    assert_eq!(matches.get_count("verbose"), 2);
}

#[test]
fn top_level_help_lists_subcommands() {
    let help = build_cli().render_help().to_string();

    assert!(!help.contains("--compact"));
    assert!(help.contains("--library"));
    assert!(help.contains("model"));
    assert!(help.contains("check"));
    assert!(help.contains("tree"));
}
