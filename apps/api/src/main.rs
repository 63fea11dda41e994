use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lens_api::analysis::{Analyzer, AnalyzerBackend, KeywordAnalyzer, LlmAnalyzer};
use lens_api::config::Config;
use lens_api::llm_client::{self, LlmClient};
use lens_api::routes::{build_router, cors_layer};
use lens_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lens API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = build_analyzer(&config)?;
    info!("Analyzer backend: {}", analyzer.backend());
    info!("Upload limit: {} bytes", config.max_upload_bytes);

    let state = AppState::new(config.clone(), analyzer);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Selects the analyzer named by `ANALYZER_BACKEND`.
fn build_analyzer(config: &Config) -> Result<Arc<dyn Analyzer>> {
    match config.analyzer_backend {
        AnalyzerBackend::Keyword => Ok(Arc::new(KeywordAnalyzer)),
        AnalyzerBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required for the llm backend")?;
            let llm = LlmClient::new(api_key).context("failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(LlmAnalyzer(llm)))
        }
    }
}
