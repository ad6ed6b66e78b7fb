//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for bridelab-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set. In particular the provider
/// credential is optional: a deployment without `OPENAI_API_KEY` stays up
/// and answers chat requests with a canned fallback reply.
#[derive(Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated list of allowed CORS origins. `None` means wildcard,
    /// which suits local development where the portal UI runs on another
    /// port.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI under `/swagger-ui` (default: `true`).
    pub enable_swagger: bool,

    /// Provider API key. `None` is a supported state: the chat relay then
    /// skips the outbound call entirely.
    pub openai_api_key: Option<String>,

    /// Base URL of the provider's API
    /// (default: `"https://api.openai.com/v1"`).
    pub openai_base_url: String,

    /// Model identifier sent with every completion request.
    pub chat_model: String,

    /// Sampling temperature sent with every completion request.
    pub chat_temperature: f32,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("BRIDELAB_BIND", "0.0.0.0:3000"),
            log_level: env_or("BRIDELAB_LOG", "info"),
            log_json: std::env::var("BRIDELAB_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cors_allowed_origins: std::env::var("BRIDELAB_CORS_ORIGINS").ok(),
            enable_swagger: std::env::var("BRIDELAB_ENABLE_SWAGGER")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            openai_base_url: env_or("BRIDELAB_OPENAI_BASE_URL", "https://api.openai.com/v1"),
            chat_model: env_or("BRIDELAB_CHAT_MODEL", "gpt-4o-mini"),
            chat_temperature: parse_env("BRIDELAB_CHAT_TEMPERATURE", 0.7),
        }
    }
}

impl std::fmt::Debug for Config {
    // hand-written so the credential can never reach logs via {:?}
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("enable_swagger", &self.enable_swagger)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("chat_model", &self.chat_model)
            .field("chat_temperature", &self.chat_temperature)
            .finish()
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    fn sample(api_key: Option<&str>) -> Config {
        Config {
            bind_address: "127.0.0.1:0".into(),
            log_level: "info".into(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: false,
            openai_api_key: api_key.map(str::to_owned),
            openai_base_url: "https://api.openai.com/v1".into(),
            chat_model: "gpt-4o-mini".into(),
            chat_temperature: 0.7,
        }
    }

    #[test]
    fn debug_output_redacts_credential() {
        let rendered = format!("{:?}", sample(Some("sk-secret")));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn debug_output_shows_absent_credential_as_none() {
        let rendered = format!("{:?}", sample(None));
        assert!(rendered.contains("openai_api_key: None"));
    }
}
