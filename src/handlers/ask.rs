//! Ask handler
//!
//! POST /ask

use crate::handlers::AppState;
use crate::models::{AskRequest, AskResponse};
use crate::utils::error::{AppError, AppResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Relay one question to the inference router
pub async fn handle_ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    let Json(request) = payload.map_err(reject_payload)?;

    debug!("Received ask request (override: {:?})", request.model_override());

    let response = state.relay.ask(request).await?;

    Ok(Json(response))
}

fn reject_payload(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(rejection.body_text())
    }
}
