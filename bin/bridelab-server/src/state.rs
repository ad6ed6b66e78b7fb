//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use bridelab_openai::CompletionClient;

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Provider client, built once at startup. `None` when no credential is
    /// configured, which switches the chat relay to its canned fallback
    /// reply and suppresses all outbound calls.
    pub completions: Option<CompletionClient>,
}

impl AppState {
    /// Build the state from a loaded [`Config`].
    ///
    /// Presence of the credential is decided here, once; handlers only ever
    /// branch on `completions`, so tests can simulate both deployments by
    /// constructing a [`Config`] with or without a key.
    pub fn from_config(config: Config) -> Self {
        let completions = config.openai_api_key.as_deref().map(|key| {
            CompletionClient::new(
                key,
                config.openai_base_url.clone(),
                config.chat_model.clone(),
                config.chat_temperature,
            )
        });

        Self {
            config: Arc::new(config),
            completions,
        }
    }
}
