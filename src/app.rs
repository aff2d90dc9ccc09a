use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::{data_routes, visit_routes};
use crate::state::app::AppState;

/// Build the complete Axum application:
/// - /            (welcome text)
/// - /api/visits  (list + record visits)
/// - /api/data    (CRUD over data items)
///
/// Any origin may call the API.
pub fn build_app(state: AppState) -> Router {
    let api = visit_routes::routes(state.clone()).merge(data_routes::routes(state));

    Router::new()
        .route("/", get(welcome))

        // /api/*
        .nest("/api", api)

        .layer(CorsLayer::permissive())

        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// GET /
async fn welcome() -> &'static str {
    "Welcome to the API server!"
}
