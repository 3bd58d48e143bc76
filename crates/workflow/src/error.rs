use printquote_core::error::CoreError;
use printquote_core::workflow::WorkflowError;

/// Failure of a workflow service call.
///
/// Workflow refusals and domain validation are kept apart from storage
/// failures so the HTTP layer can map each to its own status code.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

