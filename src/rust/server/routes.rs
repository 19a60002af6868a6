use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::server::handlers;
use crate::server::state::AppState;

pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/predict", post(handlers::predict))
        .route("/model_info", get(handlers::model_info))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}
