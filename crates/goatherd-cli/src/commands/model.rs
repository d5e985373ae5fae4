use std::fs;
use std::path::PathBuf;

use goatherd_core::Generation;
use goatherd_lib::Config;

use super::analysis::{fail, load_and_generate, render};

pub struct ModelArgs {
    pub dir: PathBuf,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub config: Config,
    pub color: bool,
}

pub fn run(args: ModelArgs) {
    let (program, generated) = load_and_generate(&args.dir, &args.config, args.color);
    if !generated.warnings.is_empty() {
        eprintln!("{}", render(&generated.warnings, &program, args.color));
    }

    let json = to_json(&generated.generation, args.compact)
        .unwrap_or_else(|err| fail(format!("failed to serialize model: {err}")));

    match &args.output {
        Some(path) => {
            fs::write(path, json + "\n").unwrap_or_else(|err| {
                fail(format!("failed to write {}: {err}", path.display()))
            });
            tracing::info!(
                path = %path.display(),
                actions = generated.generation.actions.len(),
                "wrote model"
            );
        }
        None => println!("{json}"),
    }
}

pub fn to_json(generation: &Generation, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(generation)
    } else {
        serde_json::to_string_pretty(generation)
    }
}
