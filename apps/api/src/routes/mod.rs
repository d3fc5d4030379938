pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::cv::handlers as cv;
use crate::job::handlers as job;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // CV
        .route(
            "/api/v1/cv/extract",
            post(cv::handle_extract_cv).layer(upload_limit.clone()),
        )
        .route("/api/v1/cv/analyze", post(cv::handle_analyze_cv))
        // Job description
        .route("/api/v1/job/resolve", post(job::handle_resolve_job))
        .route("/api/v1/job/analyze", post(job::handle_analyze_job))
        // Suggestions
        .route(
            "/api/v1/suggestions",
            post(suggestions::handle_suggestions).layer(upload_limit),
        )
        .route(
            "/api/v1/suggestions/text",
            post(suggestions::handle_text_suggestions),
        )
        .with_state(state)
}
