use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::CompletionError;

/// Client for the provider's chat-completion endpoint.
///
/// Holds a reused [`reqwest::Client`] plus the fixed model identifier and
/// sampling temperature every request is issued with. Cloning is cheap; the
/// underlying connection pool is shared.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl std::fmt::Debug for CompletionClient {
    // api_key is sensitive and must not reach logs via {:?}
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl CompletionClient {
    /// Build a client for `base_url` (e.g. `"https://api.openai.com/v1"`).
    ///
    /// A trailing slash on `base_url` is tolerated.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bridelab-openai/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        }
    }

    /// Issue one completion request, forwarding `messages` verbatim.
    ///
    /// Returns the first choice's content exactly as the provider produced
    /// it: untrimmed, and empty when the provider omitted the field. Callers
    /// decide what an empty completion means. No retry, no streaming.
    pub async fn complete(&self, messages: &[Value]) -> Result<String, CompletionError> {
        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "temperature": self.temperature,
                "messages": messages,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Upstream { status, body });
        }

        let completion: ChatCompletion = resp.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!(model = %self.model, output_len = content.len(), "chat completion done");
        Ok(content)
    }
}

// ── Provider response shape ───────────────────────────────────────────────────

/// Response body of `POST /chat/completions`, reduced to the fields the
/// relay reads. Missing fields deserialize to their defaults rather than
/// failing, since provider payloads vary across models and API revisions.
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ── Tests ──────────────────────────────────────────────────────────────────────
