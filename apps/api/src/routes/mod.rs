pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::render::handlers as render_handlers;
use crate::review::handlers as review_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Review API
        .route("/api/v1/review", post(review_handlers::handle_review))
        .route(
            "/api/v1/review/upload",
            post(review_handlers::handle_review_upload)
                .layer(DefaultBodyLimit::max(review_handlers::MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/review/sample", get(review_handlers::handle_sample))
        // Render API
        .route("/api/v1/render", post(render_handlers::handle_render))
        .with_state(state)
}
