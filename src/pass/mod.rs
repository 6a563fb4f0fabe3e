//! Pass descriptors and the pipeline executor.
//!
//! A [`Pass`] is a named, independently toggleable tree rewrite plus its
//! scheduling metadata. The registry (see [`registry()`]) builds the full
//! hand-ordered list, the validator ([`validate()`]) reports configuration
//! problems, the scheduler ([`schedule()`]) resolves the final order, and
//! [`Pipeline`] folds the ordered transforms over the tree.
//!
//! Passes are idempotent by intent, not by construction: a later pass can
//! re-introduce the condition an earlier pass removed. The registry
//! compensates by registering the same transform again under a distinct
//! name at a later position (a replay), rather than looping the pipeline to
//! a fixed point. Replays are ordinary passes, so the scheduler and the
//! introspection API see the pipeline exactly as it runs.

pub mod inspect;
pub mod registry;
pub mod rewrites;
pub mod schedule;
pub mod validate;

pub use inspect::{effective_order, PassInfo};
pub use registry::{enabled_passes, registry, PipelineConfig};
pub use schedule::schedule;
pub use validate::validate;

use crate::error::PassError;
use crate::ir::Node;

/// Coarse position tag, surfaced through the introspection API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Early,
    Main,
    Late,
}

/// Explicit input to contextual transforms.
///
/// Passes share no ambient state; anything beyond the tree itself arrives
/// here, passed alongside the tree on every invocation.
#[derive(Debug, Clone, Default)]
pub struct PassContext {
    /// Name of the module being rewritten. Empty when the root is a bare
    /// fragment rather than a module.
    pub module_name: String,
}

/// The rewrite function of a pass.
///
/// Stored uniformly as boxed closures: passes share no state, only this
/// call signature, so no trait hierarchy is needed.
pub enum Transform {
    Plain(Box<dyn Fn(Node) -> Result<Node, PassError>>),
    Contextual(Box<dyn Fn(Node, &PassContext) -> Result<Node, PassError>>),
}

/// A named, toggleable unit of work with scheduling metadata.
///
/// Constructed once at pipeline-build time and never mutated afterward.
/// `run_after` / `run_before` name other passes; an empty list means "no
/// explicit constraint, the registration position decides".
pub struct Pass {
    name: String,
    enabled: bool,
    phase: Option<Phase>,
    run_after: Vec<String>,
    run_before: Vec<String>,
    transform: Transform,
}

impl Pass {
    pub fn new(
        name: impl Into<String>,
        transform: impl Fn(Node) -> Result<Node, PassError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            phase: None,
            run_after: Vec::new(),
            run_before: Vec::new(),
            transform: Transform::Plain(Box::new(transform)),
        }
    }

    pub fn contextual(
        name: impl Into<String>,
        transform: impl Fn(Node, &PassContext) -> Result<Node, PassError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            phase: None,
            run_after: Vec::new(),
            run_before: Vec::new(),
            transform: Transform::Contextual(Box::new(transform)),
        }
    }

    /// Declares passes this one must run after.
    pub fn run_after(mut self, names: &[&str]) -> Self {
        self.run_after.extend(names.iter().map(|s| s.to_string()));
        self
    }

    /// Declares passes this one must run before.
    pub fn run_before(mut self, names: &[&str]) -> Self {
        self.run_before.extend(names.iter().map(|s| s.to_string()));
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Toggles the pass without removing its registration.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase_tag(&self) -> Option<Phase> {
        self.phase
    }

    pub fn run_after_names(&self) -> &[String] {
        &self.run_after
    }

    pub fn run_before_names(&self) -> &[String] {
        &self.run_before
    }

    /// Applies the transform to `node`.
    pub fn apply(&self, node: Node, ctx: &PassContext) -> Result<Node, PassError> {
        match &self.transform {
            Transform::Plain(f) => f(node),
            Transform::Contextual(f) => f(node, ctx),
        }
    }
}

/// Executes an ordered sequence of passes over one tree.
///
/// Execution is strictly sequential: ownership of the current tree moves
/// forward through the fold, one pass at a time. No two passes commute in
/// general, which is the entire reason the scheduler exists. The pipeline
/// aborts at the first pass fault.
pub struct Pipeline {
    passes: Vec<Pass>,
    context: PassContext,
    /// If set, dumps the tree to the log sink after the named pass.
    dump_after: Option<String>,
}

impl Pipeline {
    pub fn new(context: PassContext) -> Self {
        Self {
            passes: Vec::new(),
            context,
            dump_after: None,
        }
    }

    /// Appends a pass to the end of the pipeline.
    pub fn add_pass(&mut self, pass: Pass) {
        self.passes.push(pass);
    }

    /// Configures a debug tree dump after the named pass completes.
    pub fn set_dump_after(&mut self, pass_name: impl Into<String>) {
        self.dump_after = Some(pass_name.into());
    }

    /// Folds every pass over `node` in pipeline order.
    ///
    /// Returns `Err((pass_name, error))` at the first fault.
    pub fn run(&self, node: Node) -> Result<Node, (String, PassError)> {
        let mut node = node;
        for pass in &self.passes {
            node = pass
                .apply(node, &self.context)
                .map_err(|e| (pass.name().to_owned(), e))?;
            if let Some(ref target) = self.dump_after {
                if pass.name() == target.as_str() {
                    log::debug!("tree after {}:\n{:#?}", pass.name(), node);
                }
            }
        }
        Ok(node)
    }

    /// Returns the names of all registered passes in pipeline order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }
}
