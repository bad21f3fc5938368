//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors returned by the pipeline coordinator itself.
///
/// Stage-level collaborator failures do not surface here; they are
/// folded into the run report under the required/optional policy. This
/// enum covers rejections before any stage runs and coordinator
/// bookkeeping failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Stage precondition not satisfied: {0}")]
    Precondition(String),

    #[error("Store error: {0}")]
    Store(#[from] vforge_store::StoreError),
}

impl PipelineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}
