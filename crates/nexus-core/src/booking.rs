//! Appointment booking through simulated agent negotiation.
//!
//! [`SimulatedSchedulerAgent`] is the default [`SchedulerAgent`]. It
//! validates the raw request into a [`BookingRequest`] and reports the
//! negotiation the scheduler, provider and user agents would perform. No
//! calendar is consulted; every valid request succeeds.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::collaborator::SchedulerAgent;
use crate::error::CollaboratorError;
use crate::intent::Urgency;

/// Validated view over a booking request body.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub service: String,
    pub provider_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
    pub urgency: Urgency,
}

impl BookingRequest {
    /// Validates a raw request body.
    ///
    /// Every failing field is reported in a single validation error.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, CollaboratorError> {
        let mut problems = Vec::new();

        let service = required_str(body, "service", "Service is required", &mut problems);
        let provider_id = required_str(body, "providerId", "Provider is required", &mut problems);
        let time = required_str(body, "time", "Time is required", &mut problems);
        let date = match body.get("date").and_then(Value::as_str).and_then(parse_date) {
            Some(date) => Some(date),
            None => {
                problems.push("Valid date is required".to_string());
                None
            }
        };

        let urgency = match body.get("urgency") {
            None | Some(Value::Null) => Urgency::Medium,
            Some(raw) => match serde_json::from_value::<Urgency>(raw.clone()) {
                Ok(urgency) => urgency,
                Err(_) => {
                    problems.push("Urgency must be low, medium or high".to_string());
                    Urgency::Medium
                }
            },
        };

        match (service, provider_id, time, date) {
            (Some(service), Some(provider_id), Some(time), Some(date)) if problems.is_empty() => {
                Ok(BookingRequest {
                    service,
                    provider_id,
                    date,
                    time,
                    notes: body.get("notes").and_then(Value::as_str).map(str::to_string),
                    urgency,
                })
            }
            _ => Err(CollaboratorError::Validation(problems.join("; "))),
        }
    }
}

fn required_str(
    body: &Map<String, Value>,
    key: &str,
    problem: &str,
    problems: &mut Vec<String>,
) -> Option<String> {
    let value = body
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    if value.is_none() {
        problems.push(problem.to_string());
    }
    value
}

/// Zone-less ISO date-time layouts, most specific first.
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// ISO date-time layouts with a numeric offset such as `+0100`.
const OFFSET_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Accepts `YYYY-MM-DD`, RFC 3339, or an ISO date-time with or without
/// seconds, fractional seconds and offset. The calendar date is taken as
/// written, before any offset is applied.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            OFFSET_DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.naive_local())
        })
        .map(|dt| dt.date())
}

/// One message exchanged between agents while booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationStep {
    pub agent: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub result: String,
}

/// Result of a successful booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutcome {
    pub success: bool,
    pub appointment_id: String,
    pub negotiation_log: Vec<NegotiationStep>,
}

/// A slot offered instead of the requested one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSlot {
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub time: String,
    pub provider: String,
    pub confidence: f64,
}

/// Default scheduler agent.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSchedulerAgent {
    /// Fixed reference date for alternatives; `None` means the current UTC date.
    today: Option<NaiveDate>,
}

impl SimulatedSchedulerAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    /// Produces the negotiation outcome for a validated request.
    pub fn negotiate(&self, request: &BookingRequest) -> BookingOutcome {
        let now = Utc::now();
        let step = |agent: &str, action: &str, result: &str| NegotiationStep {
            agent: agent.to_string(),
            action: action.to_string(),
            timestamp: now,
            result: result.to_string(),
        };

        tracing::info!(
            service = %request.service,
            provider = %request.provider_id,
            date = %request.date,
            "negotiating booking"
        );

        BookingOutcome {
            success: true,
            appointment_id: format!("ai_{}", Uuid::new_v4().simple()),
            negotiation_log: vec![
                step("SchedulerAgent", "slot_search", "Found 3 available slots"),
                step("ProviderAgent", "availability_check", "Confirmed availability"),
                step("UserAgent", "preference_match", "Optimal slot selected"),
            ],
        }
    }

    /// Proposes three slots following `from`.
    pub fn alternatives_after(&self, from: NaiveDate, provider: &str) -> Vec<AlternativeSlot> {
        [(1, "10:00 AM", 0.9), (1, "2:30 PM", 0.8), (2, "11:00 AM", 0.7)]
            .into_iter()
            .filter_map(|(offset, time, confidence)| {
                let date = from.checked_add_days(Days::new(offset))?;
                Some(AlternativeSlot {
                    date: date.format("%Y-%m-%d").to_string(),
                    time: time.to_string(),
                    provider: provider.to_string(),
                    confidence,
                })
            })
            .collect()
    }
}

#[async_trait]
impl SchedulerAgent for SimulatedSchedulerAgent {
    async fn process_booking_request(
        &self,
        request: Map<String, Value>,
    ) -> Result<Value, CollaboratorError> {
        let booking = BookingRequest::from_body(&request)?;
        Ok(serde_json::to_value(self.negotiate(&booking))?)
    }

    async fn find_alternatives(
        &self,
        request: Map<String, Value>,
    ) -> Result<Vec<AlternativeSlot>, CollaboratorError> {
        let provider = request
            .get("providerId")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CollaboratorError::validation("Provider is required"))?;

        let from = match request.get("date") {
            None | Some(Value::Null) => self.today.unwrap_or_else(|| Utc::now().date_naive()),
            Some(raw) => raw
                .as_str()
                .and_then(parse_date)
                .ok_or_else(|| CollaboratorError::validation("Valid date is required"))?,
        };

        Ok(self.alternatives_after(from, provider))
    }
}
