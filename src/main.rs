use question_relay::config::{AppConfig, API_KEY_ENV};
use question_relay::observability::init_tracing;
use question_relay::{build_app, run_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    init_tracing("info", json_logs);

    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("{} is not set; /generate-question will answer 500", API_KEY_ENV);
    }
    tracing::info!(
        model = %config.model,
        max_chars = config.max_chars,
        timeout_ms = config.timeout_ms,
        transport_failure = ?config.transport_failure,
        "configuration loaded"
    );

    let port = config.port;
    let app = build_app(AppState::new(config));

    run_server(app, port).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })
}
