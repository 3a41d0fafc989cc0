/// HTTP adapters for the external Judge and Responder services.
pub mod judge;
pub mod responder;

use reqwest::StatusCode;

use crate::domain::models::EndpointConfig;
use crate::domain::ports::CollaboratorError;

pub use judge::HttpJudge;
pub use responder::HttpResponder;

/// Maps HTTP status codes to the collaborator error taxonomy:
/// - 400: invalid request
/// - 401, 403: authentication failed
/// - 429: rate limit exceeded (transient)
/// - 500-504: server error (transient)
/// - 529: overloaded (transient)
/// - other: unknown
pub(crate) fn error_from_status(status: StatusCode, body: String) -> CollaboratorError {
    match status.as_u16() {
        400 => CollaboratorError::InvalidRequest(body),
        401 | 403 => CollaboratorError::AuthenticationFailed(body),
        429 => CollaboratorError::RateLimited,
        500..=504 => CollaboratorError::ServerError(body),
        529 => CollaboratorError::Overloaded,
        _ => CollaboratorError::Unknown(format!("HTTP {status}: {body}")),
    }
}

/// Maps transport-level reqwest failures.
pub(crate) fn error_from_transport(err: &reqwest::Error) -> CollaboratorError {
    if err.is_timeout() {
        CollaboratorError::Timeout
    } else {
        CollaboratorError::Network(err.to_string())
    }
}

/// Builds a client honoring the endpoint's timeout. This is the only
/// timeout this layer relies on.
pub(crate) fn build_client(endpoint: &EndpointConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(endpoint.timeout_secs))
        .build()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_from_status(StatusCode::BAD_REQUEST, "bad".to_string()),
            CollaboratorError::InvalidRequest(_)
        ));
        assert!(matches!(
            error_from_status(StatusCode::UNAUTHORIZED, "key".to_string()),
            CollaboratorError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            error_from_status(StatusCode::FORBIDDEN, "denied".to_string()),
            CollaboratorError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            error_from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            CollaboratorError::RateLimited
        ));
        assert!(matches!(
            error_from_status(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            CollaboratorError::ServerError(_)
        ));
        assert!(matches!(
            error_from_status(StatusCode::BAD_GATEWAY, String::new()),
            CollaboratorError::ServerError(_)
        ));
        assert!(matches!(
            error_from_status(StatusCode::from_u16(529).unwrap(), String::new()),
            CollaboratorError::Overloaded
        ));
        assert!(matches!(
            error_from_status(StatusCode::IM_A_TEAPOT, String::new()),
            CollaboratorError::Unknown(_)
        ));
    }

    #[test]
    fn test_transient_statuses_map_to_transient_errors() {
        for code in [429_u16, 500, 502, 503, 504, 529] {
            let error = error_from_status(StatusCode::from_u16(code).unwrap(), String::new());
            assert!(error.is_transient(), "HTTP {code} should be transient");
        }
        for code in [400_u16, 401, 403, 418] {
            let error = error_from_status(StatusCode::from_u16(code).unwrap(), String::new());
            assert!(!error.is_transient(), "HTTP {code} should be permanent");
        }
    }
}
