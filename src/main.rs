use std::error::Error;
use std::sync::Arc;

use angel_devil::adapters::ai::{OpenAIConfig, OpenAIProvider};
use angel_devil::adapters::http::{build_router, DecisionAppState};
use angel_devil::config::{AppConfig, DEFAULT_CONFIG_PATH};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let (config, load_error) = match AppConfig::load_validated(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.server.log_level);

    match load_error {
        None => info!(path = %config_path, "Loaded configuration"),
        Some(e) => warn!(
            path = %config_path,
            error = %e,
            "Failed to load configuration, using defaults"
        ),
    }
    let config = Arc::new(config);

    if !config.llm.has_api_key() {
        warn!("No LLM API key configured, upstream calls will be unauthenticated");
    }

    let provider = OpenAIProvider::new(OpenAIConfig::from_llm_config(&config.llm))?;
    let state = DecisionAppState::new(Arc::new(provider), &config.app);
    let app = build_router(state, &config.app.cors);

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(
        address = %bind_address,
        service = %config.app.title,
        version = %config.app.version,
        model = %config.llm.model,
        "Starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level. `LOG_FORMAT=json` switches to
/// structured output.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
