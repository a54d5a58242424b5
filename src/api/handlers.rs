use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::TransportFailureMode;
use crate::error::ApiError;
use crate::input::{extract_text, parse_body, received_keys, truncate_chars};
use crate::prompt::user_prompt;
use crate::AppState;

use super::models::{ErrorResponse, PingResponse, QuestionResponse};

/// Served when the upstream call never produced a response.
pub const FALLBACK_QUESTION: &str =
    "What is the main idea of the fragment, and which sentence in the text supports it?";

const PREVIEW_CHARS: usize = 120;

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        message: "question relay is running",
    })
}

pub async fn generate_question(State(state): State<AppState>, body: Bytes) -> Response {
    match question_for(&state, &body).await {
        Ok(question) => Json(QuestionResponse::generated(question)).into_response(),
        Err(ApiError::Upstream(err))
            if err.is_transport()
                && state.config.transport_failure == TransportFailureMode::Fallback =>
        {
            tracing::warn!(error = %err, "serving fallback question");
            Json(QuestionResponse {
                question: FALLBACK_QUESTION.to_string(),
                fallback: Some(true),
                error: Some("Error generating the question".to_string()),
                details: Some(err.to_string()),
            })
            .into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn question_for(state: &AppState, raw_body: &[u8]) -> Result<String, ApiError> {
    let body = parse_body(raw_body);
    let keys = received_keys(&body);
    tracing::debug!(received_keys = ?keys, "generate-question request");

    let Some(text) = extract_text(&body) else {
        tracing::info!(received_keys = ?keys, "rejected request without text");
        return Err(ApiError::MissingText {
            received_keys: keys,
        });
    };
    let text = truncate_chars(&text, state.config.max_chars);

    let Some(api_key) = state.config.api_key.as_deref() else {
        tracing::error!("upstream API key is not configured");
        return Err(ApiError::MissingApiKey);
    };

    tracing::info!(
        text_len = text.chars().count(),
        preview = truncate_chars(text, PREVIEW_CHARS),
        model = %state.config.model,
        "requesting question"
    );

    let prompt = user_prompt(text);
    state
        .upstream
        .generate(api_key, &prompt, &state.config)
        .await
        .inspect_err(|err| tracing::error!(error = %err, "question generation failed"))
        .map_err(ApiError::from)
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found"))).into_response()
}
