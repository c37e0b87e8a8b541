use thiserror::Error;

/// Failure classes the rest of the application distinguishes. Backend text is
/// carried verbatim so handlers can surface it exactly once, with no retry.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The id does not exist in the collection. Rendered with its own fixed
    /// message, distinct from transport or backend failures.
    #[error("record not found")]
    NotFound,

    /// The backend answered with an error body.
    #[error("{0}")]
    Backend(String),

    /// The request never got a usable answer (DNS, TLS, connection reset).
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}
