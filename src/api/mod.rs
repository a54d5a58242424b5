mod handlers;
mod models;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use handlers::{generate_question, not_found, ping, FALLBACK_QUESTION};
pub use models::{ErrorResponse, PingResponse, QuestionResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/generate-question", post(generate_question))
        .fallback(not_found)
        .with_state(state)
}
