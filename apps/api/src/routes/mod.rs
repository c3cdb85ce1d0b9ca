pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Blog post (typed sections)
        .route("/api/generate-blog", post(handlers::handle_generate_blog))
        .route(
            "/api/generate-blog-humanized",
            post(handlers::handle_generate_blog_humanized),
        )
        // Landing page
        .route("/api/generate-page", post(handlers::handle_generate_page))
        .route(
            "/api/generate-page-humanized",
            post(handlers::handle_generate_page_humanized),
        )
        .route(
            "/api/generate-page-bundle",
            post(handlers::handle_generate_page_bundle),
        )
        .with_state(state)
}
