use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::search::SearchClient;

pub mod handlers;
pub mod models;

pub fn create_router(client: Arc<SearchClient>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/run", post(handlers::run_handler))
        .route("/api/definition", get(handlers::definition_handler))
        .with_state(client)
        .layer(cors)
}
