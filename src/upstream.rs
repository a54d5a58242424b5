use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tokio::time::{timeout, Duration};

use crate::config::AppConfig;
use crate::prompt::ChatRequest;

/// Returned when the provider answers 2xx without usable content.
pub const PLACEHOLDER_QUESTION: &str = "Could not generate the question.";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request timed out after {0} ms")]
    Timeout(u64),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid header value for {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("upstream returned a non-JSON body (status {status})")]
    MalformedBody { status: StatusCode, raw: String },

    #[error("upstream returned status {status}")]
    ErrorStatus { status: StatusCode, details: Value },
}

impl UpstreamError {
    /// True for failures where no usable response reached us.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Transport(_) | Self::InvalidHeader { .. }
        )
    }
}

/// Chat-completion client. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug, Default)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends a single completion request and classifies the reply.
    pub async fn generate(
        &self,
        api_key: &str,
        prompt: &str,
        config: &AppConfig,
    ) -> Result<String, UpstreamError> {
        let headers = build_headers(api_key, config)?;
        let payload = ChatRequest::new(config, prompt);

        let exchange = async {
            let response = self
                .http
                .post(&config.api_url)
                .headers(headers)
                .json(&payload)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, raw) = timeout(Duration::from_millis(config.timeout_ms), exchange)
            .await
            .map_err(|_| UpstreamError::Timeout(config.timeout_ms))??;

        classify(status, raw)
    }
}

fn build_headers(api_key: &str, config: &AppConfig) -> Result<HeaderMap, UpstreamError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        header_value("Authorization", &format!("Bearer {api_key}"))?,
    );

    if let Some(referer) = &config.referer {
        headers.insert("http-referer", header_value("HTTP-Referer", referer)?);
    }
    if let Some(title) = &config.title {
        headers.insert("x-title", header_value("X-Title", title)?);
    }

    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, UpstreamError> {
    HeaderValue::from_str(value).map_err(|e| UpstreamError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}

/// JSON validity is checked before the status code: a non-JSON error page is
/// malformed, not a provider error.
pub fn classify(status: StatusCode, raw: String) -> Result<String, UpstreamError> {
    let data: Value = match serde_json::from_str(&raw) {
        Ok(data) => data,
        Err(_) => return Err(UpstreamError::MalformedBody { status, raw }),
    };

    if !status.is_success() {
        return Err(UpstreamError::ErrorStatus {
            status,
            details: data,
        });
    }

    let question = data
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .unwrap_or(PLACEHOLDER_QUESTION);

    Ok(question.to_string())
}
