//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! The error text is surfaced to the caller as-is, including the provider's
//! raw response body on upstream failures: the portal widget renders
//! whatever `error` string it receives and lets the user resend. No failure
//! path terminates the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use bridelab_openai::CompletionError;

/// All errors that can occur in the bridelab-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The completion provider answered with a non-success status; the
    /// payload is the provider's response body, untouched.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ServerError::Upstream(m) => {
                error!(body = %m, "completion provider returned an error");
                (StatusCode::INTERNAL_SERVER_ERROR, m)
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, m)
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<CompletionError> for ServerError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Upstream { body, .. } => ServerError::Upstream(body),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let resp = ServerError::BadRequest("Invalid payload".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_and_internal_map_to_500() {
        let resp = ServerError::Upstream("rate limited".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = ServerError::Internal("boom".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn completion_upstream_error_keeps_body_verbatim() {
        let err = CompletionError::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "rate limited".into(),
        };
        match ServerError::from(err) {
            ServerError::Upstream(body) => assert_eq!(body, "rate limited"),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
