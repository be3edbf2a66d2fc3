//! Request handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use chrono::{SecondsFormat, Utc};
use nudge_observability::http_request_span;
use serde_json::{Value, json};
use tracing::{Instrument, info, warn};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{ChatResponse, Issue};
use crate::validation::parse_chat_request;

/// `POST /api/chat`
pub(crate) async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = http_request_span!("POST", "/api/chat", request_id.as_str());

    async move {
        let result = handle_chat(&state, payload).await;
        let span = tracing::Span::current();
        match &result {
            Ok(_) => {
                span.record("http.status_code", 200u16);
            }
            Err(e) => {
                span.record("http.status_code", e.status_code().as_u16());
                match e {
                    ApiError::InvalidRequest(issues) => {
                        warn!(issues = issues.len(), "Rejected chat request")
                    }
                    ApiError::Runtime(err) => nudge_observability::record_error(err),
                }
            }
        }
        result
    }
    .instrument(span)
    .await
}

async fn handle_chat(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        ApiError::InvalidRequest(vec![Issue::new("invalid_json", &[], rejection.body_text())])
    })?;
    let request = parse_chat_request(&body).map_err(ApiError::InvalidRequest)?;

    info!(
        content.len = request.content.len() as u64,
        bias.target = request.logit_bias_string.as_deref().unwrap_or(""),
        "Chat request"
    );

    let outcome = state.runner.run(request.to_input()).await?;

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    Ok(Json(ChatResponse::new(request, outcome, timestamp)))
}

/// `GET /health`
pub(crate) async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.runner.config();
    Json(json!({
        "status": "ok",
        "service": nudge_constant::NAME,
        "version": nudge_constant::VERSION,
        "model": config.model,
        "encoding": state.runner.compiler().encoding(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}
