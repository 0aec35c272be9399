//! API endpoints
//! 
//! Este módulo arma el router principal del BFF de la consola.

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::middleware::session::session_middleware;
use crate::routes::console_routes::create_console_router;
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router(state: AppState) -> Router {
    let console = create_console_router()
        .route_layer(from_fn_with_state(state.clone(), session_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api/console", console)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&state.config.cors_origins))
        .with_state(state)
}

/// Health check
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "route-console",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
