use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use printquote_core::error::CoreError;
use printquote_core::workflow::WorkflowError;
use printquote_workflow::ServiceError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`], [`WorkflowError`] and database failures. Implements [`IntoResponse`] to produce consistent
/// `{ "error": ..., "code": ... }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `printquote_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A negotiation or payment refusal.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Workflow(e) => Self::Workflow(e),
            ServiceError::Core(e) => Self::Core(e),
            ServiceError::Database(e) => Self::Database(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Core(CoreError::Validation(err.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Workflow refusals ---
            AppError::Workflow(err) => classify_workflow_error(err),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a workflow refusal to an HTTP status, error code, and message.
fn classify_workflow_error(err: &WorkflowError) -> (StatusCode, &'static str, String) {
    match err {
        WorkflowError::InvalidTransition { status, .. } => (
            StatusCode::CONFLICT,
            "INVALID_TRANSITION",
            format!("Action not available in current state ({status})"),
        ),
        WorkflowError::PriceLocked => (StatusCode::CONFLICT, "PRICE_LOCKED", err.to_string()),
        WorkflowError::NotLocked => (StatusCode::CONFLICT, "NOT_LOCKED", err.to_string()),
        WorkflowError::RoleViolation { .. } => {
            (StatusCode::FORBIDDEN, "ROLE_VIOLATION", err.to_string())
        }
        WorkflowError::InvalidAmount(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        WorkflowError::PaymentVerificationFailed { .. } => (
            StatusCode::PAYMENT_REQUIRED,
            "PAYMENT_VERIFICATION_FAILED",
            err.to_string(),
        ),
        WorkflowError::UpstreamUnavailable(msg) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "UPSTREAM_UNAVAILABLE",
            msg.clone(),
        ),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
