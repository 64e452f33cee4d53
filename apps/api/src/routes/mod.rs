pub mod cors;
pub mod health;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::roadmap::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/generate-roadmap",
            post(handlers::handle_generate_roadmap),
        )
        .route(
            "/api/v1/roadmaps/generate",
            post(handlers::handle_generate_roadmap),
        )
        .layer(from_fn_with_state(state.clone(), cors::cors_middleware))
        .with_state(state)
}
