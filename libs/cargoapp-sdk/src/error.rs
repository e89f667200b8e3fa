use std::time::Duration;

use cargoapp_auth::SessionLookupError;
use cargoapp_http::HttpError;
use thiserror::Error;

/// Errors surfaced by the remote-call gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// Signed out, or the session carries an empty access token. Raised
    /// before any network I/O.
    #[error("no active session")]
    NoSession,

    /// The session lookup itself failed (distinct from "signed out").
    #[error(transparent)]
    SessionLookupFailed(#[from] SessionLookupError),

    /// The call did not complete within its deadline.
    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Transport-level failure, passed through unchanged.
    #[error(transparent)]
    Network(#[from] HttpError),

    /// A 2xx response whose body did not fit the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The request was rejected before dispatch.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Whether a caller racing session initialization may retry this error.
    ///
    /// Only a missing session qualifies; every other kind is final for a
    /// single logical call.
    pub fn is_retryable_session_race(&self) -> bool {
        matches!(self, GatewayError::NoSession)
    }
}
