//! relix: the rewrite backend of a typed-tree to Elixir source compiler.
//!
//! Pipeline:
//!
//! ```text
//! typed tree (front-end) → registry → validator → scheduler
//!   → Pipeline (ordered fold of passes) → rewritten tree → printer
//! ```
//!
//! The front-end (parsing, type inference) and the printer (tree to source
//! text) are external collaborators. This crate owns the part in between:
//! assembling an ordered, named, conditionally enabled, dependency
//! constrained list of tree rewrites and executing it deterministically.
//!
//! Default pipeline (registration order):
//! 1. `normalize-blocks-early`  splice nested blocks
//! 2. `qualify-local-calls`     bare calls become module-qualified
//! 3. `fold-constants-early`    literal arithmetic and concatenation
//! 4. `simplify-conditionals`   literal-condition branches
//! 5. `prune-case-clauses`      unreachable clause removal
//! 6. `strip-self-assign`       drop `x = x`
//! 7. `fold-constants-late`     replay, simplification re-exposes folds
//! 8. `normalize-blocks-late`   replay, simplification re-nests blocks

pub mod diagnostics;
pub mod error;
pub mod ir;
pub mod pass;

pub use error::Error;

use diagnostics::Diagnostic;
use ir::{Node, NodeKind};
use pass::{enabled_passes, registry, schedule, validate, Pass, PassContext, Pipeline, PipelineConfig};

/// Assembles a ready-to-run pipeline for `config`.
///
/// Registry, validator, and scheduler run in that order; the returned
/// diagnostics are advisory and the pipeline is usable regardless of how
/// many there are.
pub fn assemble(config: &PipelineConfig, module_name: &str) -> (Pipeline, Vec<Diagnostic>) {
    let enabled = enabled_passes(registry(config));
    let mut diagnostics = validate(&enabled);
    let (order, schedule_diags) = schedule(&enabled);
    diagnostics.extend(schedule_diags);

    let mut slots: Vec<Option<Pass>> = enabled.into_iter().map(Some).collect();
    let mut pipeline = Pipeline::new(PassContext {
        module_name: module_name.to_owned(),
    });
    for &i in &order {
        if let Some(pass) = slots[i].take() {
            pipeline.add_pass(pass);
        }
    }
    (pipeline, diagnostics)
}

/// Rewrites `root` through the full pipeline for `config`.
///
/// Returns the final tree plus any configuration diagnostics. A pass fault
/// aborts the run; there is no partial result, since later passes assume a
/// well-formed tree.
pub fn rewrite(root: Node, config: &PipelineConfig) -> Result<(Node, Vec<Diagnostic>), Error> {
    let module_name = match &root.kind {
        NodeKind::Module { name, .. } => name.clone(),
        _ => String::new(),
    };
    let (pipeline, diagnostics) = assemble(config, &module_name);
    let root = pipeline
        .run(root)
        .map_err(|(pass, source)| Error::Pass { pass, source })?;
    Ok((root, diagnostics))
}
