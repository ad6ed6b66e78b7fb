//! Chat relay route.
//!
//! Forwards the portal widget's conversation transcript to the completion
//! provider and returns a single reply string. When no provider credential
//! is configured the relay answers with a canned reply instead of calling
//! out, so demo and preview deployments stay usable.
//!
//! The relay holds no state between invocations: one request, at most one
//! outbound call, one reply.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use utoipa::{OpenApi, ToSchema};

use crate::error::ServerError;
use crate::state::AppState;

/// Reply returned when no provider credential is configured.
const FALLBACK_REPLY: &str = "love it! 🌿 I’ll keep to the olive palette and your budget/size. Want me to search dresses now or do a try-on mockup?";

/// Reply substituted when the provider returns an empty completion.
const DEFAULT_REPLY: &str = "I’m here! Tell me your size, budget, and style and I’ll help 💐";

#[derive(OpenApi)]
#[openapi(paths(relay_chat), components(schemas(ChatReply)))]
pub struct ChatApi;

/// Register chat-relay routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(relay_chat))
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    /// The assistant's reply, whitespace-trimmed.
    pub reply: String,
}

/// Chat relay (`POST /api/chat`).
///
/// The request body is `{ "messages": [...] }`. The array is forwarded to
/// the provider verbatim (the widget already includes the system prompt
/// and the full history), so no per-message validation happens here.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = Value,
    responses(
        (status = 200, description = "Reply generated", body = ChatReply),
        (status = 400, description = "`messages` is not an array"),
        (status = 500, description = "Provider or internal error"),
    )
)]
pub async fn relay_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatReply>, ServerError> {
    // An unreadable body is an exception, not a bad payload: the widget only
    // ever sends JSON, so anything else takes the generic 500 path.
    let Json(payload) = payload.map_err(|e| ServerError::Internal(e.body_text()))?;

    let messages = match payload.get("messages").and_then(Value::as_array) {
        Some(m) => m.as_slice(),
        None => return Err(ServerError::BadRequest("Invalid payload".into())),
    };

    let Some(client) = &state.completions else {
        // No credential configured: answer without calling out.
        debug!(messages = messages.len(), "no provider credential, returning fallback reply");
        return Ok(Json(ChatReply {
            reply: FALLBACK_REPLY.to_owned(),
        }));
    };

    debug!(messages = messages.len(), "relaying transcript to completion provider");
    let content = client.complete(messages).await?;

    Ok(Json(ChatReply {
        reply: normalize_reply(&content),
    }))
}

/// Trim the completion and substitute the canned default for empty output.
fn normalize_reply(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        DEFAULT_REPLY.to_owned()
    } else {
        trimmed.to_owned()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::routes;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const VALID_BODY: &str = r#"{"messages":[{"role":"user","content":"hi"}]}"#;

    fn test_app(api_key: Option<&str>, base_url: &str) -> Router {
        let config = Config {
            bind_address: "127.0.0.1:0".into(),
            log_level: "info".into(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: false,
            openai_api_key: api_key.map(str::to_owned),
            openai_base_url: base_url.into(),
            chat_model: "gpt-4o-mini".into(),
            chat_temperature: 0.7,
        };
        routes::build(Arc::new(AppState::from_config(config)))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Serve a canned `(status, body)` on `/chat/completions` and return the
    /// base URL of the stub provider.
    async fn stub_provider(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/chat/completions", post(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    #[test]
    fn normalize_reply_trims_whitespace() {
        assert_eq!(normalize_reply("  hello  "), "hello");
    }

    #[test]
    fn normalize_reply_substitutes_default_for_empty() {
        assert_eq!(normalize_reply(""), DEFAULT_REPLY);
        assert_eq!(normalize_reply("   "), DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn rejects_non_array_messages() {
        for body in [
            r#"{"messages":"hi"}"#,
            r#"{"messages":42}"#,
            r#"{"messages":null}"#,
            r#"{"messages":{}}"#,
            r#"{}"#,
        ] {
            let (status, json) = post_chat(test_app(None, "http://unused"), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json["error"], "Invalid payload", "body: {body}");
        }
    }

    #[tokio::test]
    async fn answers_with_fallback_reply_without_credential() {
        let (status, json) = post_chat(test_app(None, "http://unused"), VALID_BODY).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn fallback_reply_is_deterministic() {
        // The no-credential branch has no side effects, so repeating the
        // identical request must yield the identical reply.
        let app = test_app(None, "http://unused");
        let (_, first) = post_chat(app.clone(), VALID_BODY).await;
        let (_, second) = post_chat(app, VALID_BODY).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn malformed_body_is_an_internal_error() {
        let (status, json) = post_chat(test_app(None, "http://unused"), "{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn trims_completion_whitespace() {
        let base = stub_provider(
            StatusCode::OK,
            r#"{"choices":[{"message":{"role":"assistant","content":"  hello  "}}]}"#,
        )
        .await;

        let (status, json) = post_chat(test_app(Some("test-key"), &base), VALID_BODY).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "hello");
    }

    #[tokio::test]
    async fn substitutes_default_reply_for_empty_completion() {
        let base = stub_provider(
            StatusCode::OK,
            r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#,
        )
        .await;

        let (status, json) = post_chat(test_app(Some("test-key"), &base), VALID_BODY).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn surfaces_upstream_error_body_verbatim() {
        let base = stub_provider(StatusCode::TOO_MANY_REQUESTS, "rate limited").await;

        let (status, json) = post_chat(test_app(Some("test-key"), &base), VALID_BODY).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "rate limited");
    }
}
