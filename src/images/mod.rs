use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::post, Router};

pub mod handlers;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listings/images", post(handlers::upload_images))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}
