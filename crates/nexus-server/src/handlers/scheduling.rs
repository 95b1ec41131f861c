//! Appointment scheduling handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};

use nexus_core::AgentKind;

use crate::error::ApiError;
use crate::schema::scheduling::AlternativesResponse;
use crate::state::AppState;

/// `POST /schedule-appointment`
pub async fn schedule_appointment(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;

    let _busy = state.roster.begin(AgentKind::Scheduler);
    let result = state.scheduler.process_booking_request(body).await?;
    Ok(Json(result))
}

/// `POST /find-alternatives`
pub async fn find_alternatives(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<AlternativesResponse>, ApiError> {
    let Json(body) = payload?;

    let _busy = state.roster.begin(AgentKind::Scheduler);
    let alternatives = state.scheduler.find_alternatives(body).await?;
    Ok(Json(AlternativesResponse { alternatives }))
}
