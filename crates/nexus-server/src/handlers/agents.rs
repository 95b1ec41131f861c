//! Agent status handler.

use axum::extract::State;
use axum::Json;

use crate::schema::agents::AgentStatusResponse;
use crate::state::AppState;

/// `GET /agents/status`
pub async fn agent_status(State(state): State<AppState>) -> Json<AgentStatusResponse> {
    Json(AgentStatusResponse {
        agents: state.roster.snapshot(),
        connections: state.connection_count(),
    })
}
