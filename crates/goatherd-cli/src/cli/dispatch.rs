//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields, including the
//!   global `--library`/`--color` options
//! - `Into<*Args>` impls bridge dispatch to command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use goatherd_lib::Config;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::model::ModelArgs;
use crate::commands::tree::TreeArgs;

pub struct ModelParams {
    pub dir: PathBuf,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub library: Option<String>,
    pub color: ColorChoice,
}

impl ModelParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            dir: parse_dir(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            compact: m.get_flag("compact"),
            library: m.get_one::<String>("library").cloned(),
            color: parse_color(m),
        }
    }
}

impl ModelParams {
    /// `goatherd` with no subcommand: the current directory, pretty JSON on stdout.
    pub fn defaults(m: &ArgMatches) -> Self {
        Self {
            dir: PathBuf::from("."),
            output: None,
            compact: false,
            library: m.get_one::<String>("library").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<ModelParams> for ModelArgs {
    fn from(p: ModelParams) -> Self {
        Self {
            dir: p.dir,
            output: p.output,
            compact: p.compact,
            config: config(p.library),
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub dir: PathBuf,
    pub strict: bool,
    pub library: Option<String>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            dir: parse_dir(m),
            strict: m.get_flag("strict"),
            library: m.get_one::<String>("library").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            dir: p.dir,
            strict: p.strict,
            config: config(p.library),
            color: p.color.should_colorize(),
        }
    }
}

pub struct TreeParams {
    pub source_path: PathBuf,
    pub raw: bool,
    pub spans: bool,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m
                .get_one::<PathBuf>("source_path")
                .cloned()
                .expect("source_path is required"),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source_path: p.source_path,
            raw: p.raw,
            spans: p.spans,
        }
    }
}

fn parse_dir(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn config(library: Option<String>) -> Config {
    match library {
        Some(path) => Config::default().with_library(path),
        None => Config::default(),
    }
}
