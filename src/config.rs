use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct:free";
const DEFAULT_TITLE: &str = "Buddy Retrieval Practice";
const DEFAULT_MAX_CHARS: usize = 2500;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 120;
const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Name of the variable holding the upstream credential. Also used in the
/// misconfiguration error returned to clients.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// What the generation endpoint does when the upstream call fails at the
/// transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailureMode {
    /// Reply 200 with a canned question flagged `fallback: true`.
    Fallback,
    /// Reply 500 with the error.
    Error,
}

impl TransportFailureMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fallback" => Some(Self::Fallback),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub referer: Option<String>,
    pub title: Option<String>,
    pub max_chars: usize,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_ms: u64,
    pub transport_failure: TransportFailureMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            referer: None,
            title: Some(DEFAULT_TITLE.to_string()),
            max_chars: DEFAULT_MAX_CHARS,
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            transport_failure: TransportFailureMode::Fallback,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unparseable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = non_blank("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let max_chars = non_blank("MAX_CHARS")
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.max_chars);

        let timeout_ms = non_blank("UPSTREAM_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_ms);

        let transport_failure = non_blank("TRANSPORT_FAILURE_MODE")
            .and_then(|value| TransportFailureMode::parse(&value))
            .unwrap_or(defaults.transport_failure);

        Self {
            port,
            api_key: non_blank(API_KEY_ENV),
            api_url: non_blank("OPENROUTER_API_URL").unwrap_or(defaults.api_url),
            model: non_blank("OPENROUTER_MODEL").unwrap_or(defaults.model),
            referer: non_blank("OPENROUTER_REFERER"),
            title: non_blank("OPENROUTER_TITLE").or(defaults.title),
            max_chars,
            temperature: optional_param(non_blank("TEMPERATURE"), defaults.temperature),
            max_tokens: optional_param(non_blank("MAX_TOKENS"), defaults.max_tokens),
            timeout_ms,
            transport_failure,
        }
    }
}

// "none" switches a sampling parameter off entirely.
fn optional_param<T: std::str::FromStr>(raw: Option<String>, default: Option<T>) -> Option<T> {
    match raw {
        Some(value) if value.eq_ignore_ascii_case("none") => None,
        Some(value) => value.parse::<T>().ok().or(default),
        None => default,
    }
}
