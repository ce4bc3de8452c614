use crate::api::models::*;
use crate::llm::CompletionRequest;
use crate::review::{ReviewResult, SYSTEM_ROLE, build_prompt, parse_review};
use crate::storage::ReviewRecord;
use axum::{Json, extract::State};
use chrono::Utc;
use tracing::{info, warn};

pub async fn review_handler(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResult>, AppError> {
    // Validate before anything leaves the process
    request.validate().map_err(AppError::BadRequest)?;

    info!(
        language = %request.language,
        snippet_len = request.code_snippet.len(),
        provider = state.completion.provider_name(),
        "Reviewing snippet"
    );

    // Ask the model
    let completion = CompletionRequest {
        system: SYSTEM_ROLE.to_string(),
        prompt: build_prompt(&request.language, &request.code_snippet),
        temperature: state.temperature,
    };
    let raw = state
        .completion
        .complete(&completion)
        .await
        .map_err(|e| AppError::Internal(format!("{:#}", e)))?;

    // Parse
    let result = parse_review(&raw).map_err(|e| {
        warn!(error = %e, reply_len = raw.len(), "Model reply is not valid JSON");
        AppError::UpstreamFormat("AI returned invalid JSON".to_string())
    })?;

    // Persist; a failed insert fails the whole request
    let record = ReviewRecord::new(&request.language, &result, Utc::now())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let id = state
        .store
        .append(&record)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!(
        id,
        score = %result.score,
        bugs = result.bugs.len(),
        optimizations = result.optimizations.len(),
        "Review stored"
    );

    Ok(Json(result))
}
