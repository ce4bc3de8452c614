use crate::api::models::AppState;
use crate::api::review::handlers::review_handler;
use axum::{Router, routing::post};

pub fn routes() -> Router<AppState> {
    Router::new().route("/review", post(review_handler))
}
