//! Query parameter types for list endpoints.

use serde::Deserialize;

/// Pagination parameters (`?limit=&offset=`). Clamped by the controller.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Staff list filters (`?status=&limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct DesignRequestListParams {
    /// Status name, e.g. `negotiation_requested`.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
