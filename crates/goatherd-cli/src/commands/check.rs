use std::path::PathBuf;

use goatherd_lib::Config;

use super::analysis::{fail, load_and_generate, render};

pub struct CheckArgs {
    pub dir: PathBuf,
    pub strict: bool,
    pub config: Config,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let (program, generated) = load_and_generate(&args.dir, &args.config, args.color);
    let warnings = &generated.warnings;

    if !warnings.is_empty() {
        eprintln!("{}", render(warnings, &program, args.color));
    }
    if args.strict && warnings.has_warnings() {
        fail(format!(
            "{} warnings treated as errors",
            warnings.warning_count()
        ));
    }

    // Silent on success (like cargo check)
}
