//! Intent extraction handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};

use nexus_core::AgentKind;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /process-intent`
///
/// Reads `text` from the body; a missing or non-string value is passed to
/// the processor as `""`.
pub async fn process_intent(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let text = body.get("text").and_then(Value::as_str).unwrap_or_default();

    let _busy = state.roster.begin(AgentKind::User);
    let result = state.intent_processor.process(text).await?;
    Ok(Json(result))
}
