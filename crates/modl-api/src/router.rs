//! Route table

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, register, verification};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Registration routes
        .route("/api/register", post(register::register))
        .route(
            "/api/register/resend-verification",
            post(register::resend_verification),
        )
        .route("/api/verify-email", get(verification::verify_email))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
