//! Router assembly for the gateway.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all routes.
///
/// CORS admits only the configured origins, with credentials. Methods and
/// headers are mirrored from the preflight request since wildcards cannot
/// be combined with credentials.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/", get(handlers::status::root))
        .route("/process-intent", post(handlers::intent::process_intent))
        .route(
            "/schedule-appointment",
            post(handlers::scheduling::schedule_appointment),
        )
        .route(
            "/find-alternatives",
            post(handlers::scheduling::find_alternatives),
        )
        .route("/agents/status", get(handlers::agents::agent_status))
        .route(
            "/ws/agent-communication",
            get(handlers::relay::agent_communication),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.allowed_origins.clone()))
        .with_state(state)
}

fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
