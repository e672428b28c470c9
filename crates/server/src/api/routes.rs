use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, recognize};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Recognition
        .route(
            "/recognize",
            get(recognize::recognize).post(recognize::recognize),
        )
        .route_layer(middleware::from_fn(metrics_middleware))
        .with_state(Arc::clone(&state));

    Router::new()
        .route("/", get(handlers::home))
        .route("/metrics", get(handlers::metrics))
        // Legacy laiaDaemon paths, still used by existing clients
        .route("/laiaDaemon", get(handlers::home))
        .route(
            "/laiaDaemon/recognizeImgs",
            get(recognize::recognize).post(recognize::recognize),
        )
        .route_layer(middleware::from_fn(metrics_middleware))
        .with_state(state)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
}
