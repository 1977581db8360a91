use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::ResultEnvelope;
use crate::definition::{ToolDefinition, definition};
use crate::search::SearchClient;

use super::models::RunRequest;

/// Always answers 200 with an envelope; failures, including a body that is
/// not a tool call, are carried in `message`.
pub async fn run_handler(
    State(client): State<Arc<SearchClient>>,
    request: Result<Json<RunRequest>, JsonRejection>,
) -> Json<ResultEnvelope> {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            log::warn!("rejected /api/run body: {}", rejection.body_text());
            return Json(ResultEnvelope::error(rejection.body_text()));
        }
    };

    let start = Instant::now();
    let (configurations, parameters) = request.into_parts();
    let envelope = client.run_tool(configurations, parameters).await;
    log::info!(
        "handled /api/run in {}ms (error: {})",
        start.elapsed().as_millis(),
        envelope.is_error()
    );
    Json(envelope)
}

pub async fn definition_handler() -> Json<ToolDefinition> {
    Json(definition())
}
