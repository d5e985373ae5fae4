//! Shared load-and-analyze step of `model` and `check`.

use std::fmt::Display;
use std::path::Path;

use goatherd_lib::{Config, Diagnostics, Error, Generated, Program};

/// Load the package in `dir` and run the analysis.
///
/// Any failure is reported on stderr and ends the process with status 1;
/// analysis diagnostics are rendered against the loaded sources first.
pub fn load_and_generate(dir: &Path, config: &Config, color: bool) -> (Program, Generated) {
    tracing::info!(dir = %dir.display(), library = %config.library_path, "analyzing package");
    let program = Program::load(dir).unwrap_or_else(|err| fail(err));

    match goatherd_lib::generate(&program, config) {
        Ok(generated) => (program, generated),
        Err(Error::Analysis(diagnostics)) => {
            eprintln!("{}", render(&diagnostics, &program, color));
            fail(Error::Analysis(diagnostics))
        }
        Err(err) => fail(err),
    }
}

pub fn render(diagnostics: &Diagnostics, program: &Program, color: bool) -> String {
    diagnostics
        .printer(program.sources())
        .colored(color)
        .render()
}

pub fn fail(err: impl Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
