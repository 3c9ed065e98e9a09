use anyhow::{Context, Result};

/// Engine configuration loaded from environment variables.
///
/// Judge backends are selected by which API keys are present: a missing key
/// simply means that backend is not constructed. Model names, timeouts, and
/// cache bounds all have defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub anthropic_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// Point at an OpenAI-compatible server. Default is api.openai.com;
    /// a local Ollama instance works via `http://localhost:11434/v1`.
    pub openai_base_url: String,
    /// Per-backend wall clock budget for a single judge call, in seconds.
    pub judge_timeout_secs: u64,
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(EngineConfig {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-pro".to_string()),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            judge_timeout_secs: parse_env("JUDGE_TIMEOUT_SECS", 120)?,
            cache_capacity: parse_env("ANALYSIS_CACHE_CAPACITY", 256)?,
            cache_ttl_secs: parse_env("ANALYSIS_CACHE_TTL_SECS", 3600)?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
