//! HTTP server for the surf status dashboard.
//!
//! One route serves both representations: `GET /` renders the HTML status
//! page, `GET /?chart=1` answers with the raw series as JSON for chart
//! reloads. An optional `uri` parameter overrides the configured start IRI.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;
mod error;
mod page;
mod state;

pub use config::ServerConfig;
pub use error::ServerError;
pub use state::AppState;

/// Builds the application router for `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::status_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let ServerConfig { config, bind } = config;
    let app = create_router(AppState::new(config)?);

    // `bind` may be a hostname, so resolution is left to the listener.
    let listener = tokio::net::TcpListener::bind(bind.as_str()).await?;
    info!("listening on {}", listener.local_addr()?);
    Ok(axum::serve(listener, app).await?)
}
