pub mod config;
pub mod console;
pub mod controller;
pub mod flows;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod symptoms;

use tracing_subscriber::EnvFilter;

/// Initializes tracing and runs the interactive console against the backend
/// at `api_url`.
pub fn run(api_url: &str) -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!(api_url, "{} console starting v{}", config::APP_NAME, config::APP_VERSION);

    console::run(api_url)
}
