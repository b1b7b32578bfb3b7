pub mod api;
pub mod health;
pub mod page;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/",
            get(page::handle_page).post(page::handle_page_submit),
        )
        .route("/api/v1/analyze", post(api::handle_analyze))
        .layer(body_limit)
        .with_state(state)
}
