/// Errors raised by external collaborators.
///
/// Every variant is treated as transient by the workflow layer and surfaced
/// as "upstream unavailable"; callers retry from the UI.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote API returned a non-2xx status code.
    #[error("Upstream API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Object storage refused or failed the operation.
    #[error("Storage error: {0}")]
    Storage(String),
}
