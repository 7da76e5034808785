use std::path::PathBuf;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::guard::same_origin_only;
use super::handlers;
use super::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(handlers::history))
        .route("/clear", post(handlers::clear))
        .route("/refresh", post(handlers::refresh))
        .route(
            "/config",
            get(handlers::get_config).post(handlers::update_config),
        )
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(same_origin_only))
}

/// `/api/*` plus, when `static_dir` is given, the web UI for every other path.
///
/// No CORS headers are emitted; the UI is served from the same origin.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new().nest("/api", api_routes());

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
