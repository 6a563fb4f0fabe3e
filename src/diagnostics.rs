//! Advisory pipeline diagnostics.
//!
//! The validator and scheduler report configuration problems as
//! [`Diagnostic`] values so callers and tests can inspect them, and mirror
//! each one to the `log` facade at `warn` level. Nothing here is fatal:
//! a diagnostic never stops the pipeline from running.

use std::fmt;

/// The category of an advisory warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Two enabled passes share a name. Both still run; intentional replays
    /// should use distinct names (e.g. a `-early` / `-late` suffix).
    DuplicateName,
    /// A `run_after` / `run_before` entry names a pass that is absent from
    /// the enabled set. The constraint is vacuous and likely stale.
    MissingDependency,
    /// The declared constraints form a cycle. The scheduler keeps the
    /// registration order instead of honoring the cycle.
    DependencyCycle,
}

impl DiagnosticKind {
    /// Stable warning code, used by tooling that filters diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::DuplicateName => "W0001",
            DiagnosticKind::MissingDependency => "W0002",
            DiagnosticKind::DependencyCycle => "W0003",
        }
    }
}

/// A single advisory warning about the pass configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    /// Builds a diagnostic and mirrors it to the log sink.
    pub fn emit(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let message = message.into();
        log::warn!("[{}] {}", kind.code(), message);
        Self { kind, message }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.code(), self.message)
    }
}
