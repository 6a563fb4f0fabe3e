//! Read-only introspection over the resolved pipeline.
//!
//! External tooling (a dependency-order visualizer, build dashboards) needs
//! the effective pass order without linking against pipeline internals or
//! running a compilation. [`effective_order`] derives its answer from the
//! same registry and scheduler the real pipeline uses, so tooling can never
//! drift from actual build behavior. Transform closures are not exposed,
//! only metadata.

use crate::pass::registry::{enabled_passes, registry, PipelineConfig};
use crate::pass::schedule::schedule;
use crate::pass::{Pass, Phase};

/// Scheduling metadata of one pass. No behavior, only names and constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassInfo {
    pub name: String,
    pub phase: Option<Phase>,
    pub run_after: Vec<String>,
    pub run_before: Vec<String>,
}

impl From<&Pass> for PassInfo {
    fn from(pass: &Pass) -> Self {
        Self {
            name: pass.name().to_owned(),
            phase: pass.phase_tag(),
            run_after: pass.run_after_names().to_vec(),
            run_before: pass.run_before_names().to_vec(),
        }
    }
}

/// Returns the pass metadata in final execution order for `config`.
///
/// Pure query: no tree is rewritten and no state is touched. Scheduling
/// diagnostics are emitted to the log sink as usual but not returned here;
/// tooling that needs them calls [`crate::pass::validate()`] directly.
pub fn effective_order(config: &PipelineConfig) -> Vec<PassInfo> {
    let enabled = enabled_passes(registry(config));
    let (order, _) = schedule(&enabled);
    order.iter().map(|&i| PassInfo::from(&enabled[i])).collect()
}
