//! The hand-ordered pass registry.
//!
//! [`registry`] is a pure function of the configuration flags: it returns
//! the same ordered list every call, holds no static state, and can be
//! called repeatedly (tests, tooling, real builds). Registration position
//! is the default execution order; `run_after` / `run_before` add the only
//! hard constraints.

use crate::pass::rewrites;
use crate::pass::{Pass, Phase};

/// Named switches that toggle passes without removing their registration.
///
/// Consumed only during pipeline construction; once the enabled list is
/// built the flags have no further effect. Useful for staged rollout of a
/// new rewrite and for bisecting a miscompile to a single pass.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub normalize_blocks: bool,
    pub fold_constants: bool,
    pub simplify_conditionals: bool,
    pub prune_case_clauses: bool,
    pub strip_self_assign: bool,
    pub qualify_local_calls: bool,
    /// Off by default; logs the tree at the end of the pipeline.
    pub dump_tree: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            normalize_blocks: true,
            fold_constants: true,
            simplify_conditionals: true,
            prune_case_clauses: true,
            strip_self_assign: true,
            qualify_local_calls: true,
            dump_tree: false,
        }
    }
}

/// Builds the full registered pass list in source order.
///
/// `fold-constants` and `normalize-blocks` are replayed: simplification
/// re-exposes foldable shapes and leaves nested blocks behind, so the same
/// transform is registered again under a `-late` name near the end. The
/// replays are distinct `Pass` values sharing one function, which keeps the
/// scheduler's and the introspection API's view of the pipeline accurate.
pub fn registry(config: &PipelineConfig) -> Vec<Pass> {
    vec![
        Pass::new("normalize-blocks-early", rewrites::normalize_blocks)
            .phase(Phase::Early)
            .enabled(config.normalize_blocks),
        Pass::contextual("qualify-local-calls", rewrites::qualify_local_calls)
            .phase(Phase::Early)
            .run_after(&["normalize-blocks-early"])
            .enabled(config.qualify_local_calls),
        Pass::new("fold-constants-early", rewrites::fold_constants)
            .run_after(&["normalize-blocks-early"])
            .enabled(config.fold_constants),
        Pass::new("simplify-conditionals", rewrites::simplify_conditionals)
            .run_after(&["fold-constants-early"])
            .enabled(config.simplify_conditionals),
        Pass::new("prune-case-clauses", rewrites::prune_case_clauses)
            .run_after(&["simplify-conditionals"])
            .enabled(config.prune_case_clauses),
        Pass::new("strip-self-assign", rewrites::strip_self_assign)
            .enabled(config.strip_self_assign),
        Pass::new("fold-constants-late", rewrites::fold_constants)
            .phase(Phase::Late)
            .run_after(&["simplify-conditionals"])
            .run_before(&["normalize-blocks-late"])
            .enabled(config.fold_constants),
        Pass::new("normalize-blocks-late", rewrites::normalize_blocks)
            .phase(Phase::Late)
            .enabled(config.normalize_blocks),
        Pass::new("dump-tree", rewrites::dump_tree)
            .phase(Phase::Late)
            .run_after(&["normalize-blocks-late"])
            .enabled(config.dump_tree),
    ]
}

/// Filters the registered list down to the enabled subset, preserving
/// registration order. This subset, with its constraint metadata, is what
/// the validator and scheduler operate on.
pub fn enabled_passes(passes: Vec<Pass>) -> Vec<Pass> {
    passes.into_iter().filter(|p| p.is_enabled()).collect()
}
