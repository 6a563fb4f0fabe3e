use thiserror::Error;

/// Top-level error type for the relix rewrite pipeline.
///
/// Configuration problems (duplicate pass names, dangling dependency
/// references, dependency cycles) are *not* errors. They surface as
/// [`crate::diagnostics::Diagnostic`] values and the pipeline proceeds.
/// Only a pass execution fault aborts a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("pass '{pass}' failed: {source}")]
    Pass {
        pass: String,
        #[source]
        source: PassError,
    },
}

/// A fault raised by a pass transform.
///
/// There is no retry or local recovery: a mid-pipeline fault means a later
/// pass would observe a tree it cannot trust, so the pipeline aborts and the
/// error propagates to the caller of [`crate::rewrite`].
#[derive(Debug, Error)]
pub enum PassError {
    #[error("malformed tree: {detail}")]
    MalformedTree { detail: String },

    #[error("missing rewrite context: {detail}")]
    MissingContext { detail: String },
}
