//! Router assembly and the serve loop

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use nudge_constant::UI_ENTRYPOINT;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers;
use crate::state::AppState;

/// All routes, with static files from `ui_dir` as the fallback.
pub fn router(state: AppState, ui_dir: &Path) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .route_service("/", ServeFile::new(ui_dir.join(UI_ENTRYPOINT)))
        .fallback_service(ServeDir::new(ui_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), ServerError> {
    if !config.ui_dir.join(UI_ENTRYPOINT).is_file() {
        warn!(
            ui_dir = %config.ui_dir.display(),
            "UI entrypoint {} not found; only the API will be usable",
            UI_ENTRYPOINT
        );
    }

    let app = router(state, &config.ui_dir);
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("Server is running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C; shutting down"),
    }
}
