//! Schema types for scheduling endpoints.

use nexus_core::AlternativeSlot;
use serde::Serialize;

/// Response for `POST /find-alternatives`.
#[derive(Debug, Clone, Serialize)]
pub struct AlternativesResponse {
    pub alternatives: Vec<AlternativeSlot>,
}
