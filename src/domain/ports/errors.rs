use thiserror::Error;

/// Errors that can occur when calling the external Judge or Responder.
///
/// Kept transport-agnostic (string payloads, no client types) so that
/// domain and service code never depend on the HTTP stack.
#[derive(Error, Debug, Clone)]
pub enum CollaboratorError {
    /// Invalid request parameters or malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to invalid or missing credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded, retry after waiting
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Service encountered an internal error
    #[error("Service error: {0}")]
    ServerError(String),

    /// Service is overloaded, retry later
    #[error("Service overloaded")]
    Overloaded,

    /// Network error occurred during the request
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out waiting for a response
    #[error("Timeout waiting for response")]
    Timeout,

    /// Response body could not be decoded at the transport level
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Unknown error occurred
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl CollaboratorError {
    /// Returns true if this error is transient and should be retried.
    ///
    /// Transient: rate limiting, overload, server errors, timeouts.
    /// Permanent: bad requests, auth failures, undecodable responses.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CollaboratorError::RateLimited
                | CollaboratorError::ServerError(_)
                | CollaboratorError::Overloaded
                | CollaboratorError::Timeout
        )
    }
}
