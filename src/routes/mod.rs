//! Route handlers and router assembly

pub mod auth;
pub mod bookings;
pub mod studios;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::AppState;

/// Assemble the application router with shared middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(studios::home))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/studios", get(studios::list))
        .route("/studios/:id", get(studios::detail))
        .route("/studios/:id/book", post(studios::book))
        .route("/bookings", get(bookings::list))
        .route("/bookings/:id/cancel", post(bookings::cancel))
        .route("/bookings/:id/pay", post(bookings::pay))
        .route("/healthz", get(health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Liveness probe with cache and session statistics
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "cache": state.cache.stats(),
        "sessions": state.sessions.count(),
    }))
}
