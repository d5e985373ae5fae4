//! The whole pipeline: registrations to a `Generation`.

use goatherd_core::{ActionRegistry, Generation, PackageInfo};
use indexmap::IndexSet;

use crate::analyzer::analyze_function;
use crate::diagnostics::Diagnostics;
use crate::finder::find_registrations;
use crate::model::build_action;
use crate::program::Program;
use crate::{Config, Error, Result};

/// A successful run: the model plus any warnings.
#[derive(Debug, Clone)]
pub struct Generated {
    pub generation: Generation,
    pub warnings: Diagnostics,
}

/// Analyze every registered function of the program's root package.
///
/// Contract violations abort with `Error::Fatal` immediately. Descriptor
/// problems are collected across all functions and reported together as
/// `Error::Analysis`.
pub fn generate(program: &Program, config: &Config) -> Result<Generated> {
    let registrations = find_registrations(program, config)?;
    tracing::info!(count = registrations.len(), "found registrations");

    let mut diagnostics = Diagnostics::new();
    let mut registry = ActionRegistry::new();
    let mut seen = IndexSet::new();

    for registration in &registrations {
        if !seen.insert(&registration.function) {
            tracing::debug!(function = %registration.function, "already analyzed");
            continue;
        }

        let analysis = analyze_function(
            program,
            &registration.function,
            registration.target,
            config,
            &mut diagnostics,
        )?;

        let Some(action) = build_action(
            &registration.function,
            &registration.reference,
            &analysis.signature,
            analysis.action.as_ref(),
            &analysis.flags,
            config,
            &mut diagnostics,
        ) else {
            continue;
        };

        tracing::debug!(function = %action.function, name = %action.name, "built action");
        registry.register(action);
    }

    if diagnostics.has_errors() {
        return Err(Error::Analysis(diagnostics));
    }

    let root = program.root();
    Ok(Generated {
        generation: Generation {
            package: PackageInfo {
                name: root.name.clone(),
                path: root.path.clone(),
            },
            actions: registry,
        },
        warnings: diagnostics,
    })
}
