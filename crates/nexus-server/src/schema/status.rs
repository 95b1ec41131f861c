//! Schema for the service status endpoint.

use serde::Serialize;

/// Name reported by `GET /`.
pub const SERVICE_NAME: &str = "NexusSchedule AI Agent Service";

/// Response for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatusResponse {
    pub message: &'static str,
    pub status: &'static str,
}

impl ServiceStatusResponse {
    pub fn running() -> Self {
        ServiceStatusResponse {
            message: SERVICE_NAME,
            status: "running",
        }
    }
}
