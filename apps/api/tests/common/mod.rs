use std::net::SocketAddr;
use std::sync::Arc;

use lens_api::analysis::Analyzer;
use lens_api::config::Config;
use lens_api::routes::build_router;
use lens_api::state::AppState;

mod fixtures;

pub use fixtures::pdf_with_pages;

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_server(analyzer: Arc<dyn Analyzer>) -> (String, AppState) {
    let state = AppState::new(Config::default(), analyzer);
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}
