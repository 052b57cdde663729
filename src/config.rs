//! Completion endpoint configuration loaded from environment variables.

/// Settings for the chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// API credential; absence becomes a Config error at first use,
    /// not a startup warning.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 250,
            temperature: 0.8,
            timeout_ms: 20_000,
        }
    }
}

impl CompletionConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn load_from_env() -> Self {
        let mut config = Self::default();

        config.api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !is_placeholder(k));

        if let Ok(url) = std::env::var("REFRAME_API_URL")
            && !url.trim().is_empty()
        {
            config.api_url = url;
        }

        if let Ok(model) = std::env::var("REFRAME_MODEL")
            && !model.trim().is_empty()
        {
            config.model = model;
        }

        if let Some(max_tokens) = std::env::var("REFRAME_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.max_tokens = max_tokens.clamp(1, 4096);
        }

        if let Some(temperature) = std::env::var("REFRAME_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
        {
            config.temperature = temperature.clamp(0.0, 2.0);
        }

        if let Some(timeout_ms) = std::env::var("REFRAME_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout_ms = timeout_ms.clamp(1_000, 120_000);
        }

        config
    }
}

/// Keys copied verbatim from a template do not count as configured.
pub(crate) fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    t.is_empty()
        || t.contains("${")
        || t.eq_ignore_ascii_case("your-api-key-here")
        || t.eq_ignore_ascii_case("changeme")
}
