//! Keyword-driven intent extraction.
//!
//! [`KeywordIntentProcessor`] is the default [`IntentProcessor`]. It scans
//! lower-cased text for fixed keywords and never fails. Within each
//! category the first matching rule wins.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collaborator::IntentProcessor;
use crate::error::CollaboratorError;
use crate::reply::{respond, AgentReply};

/// Confidence reported for every keyword match.
pub const KEYWORD_CONFIDENCE: f64 = 0.8;

/// What the user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    BookAppointment,
    RescheduleAppointment,
    CancelAppointment,
    FindProvider,
    Unknown,
}

/// How soon the user needs the appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}

/// Details pulled out of the text alongside the intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_preference: Option<String>,
    /// ISO `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    pub urgency: Urgency,
}

/// Result returned by [`KeywordIntentProcessor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResult {
    pub intent: Intent,
    pub entities: Entities,
    pub confidence: f64,
    pub original_text: String,
    /// Conversational reply for the intent.
    pub response: AgentReply,
}

/// Default intent processor backed by keyword tables.
#[derive(Debug, Clone, Default)]
pub struct KeywordIntentProcessor {
    /// Fixed reference date; `None` means the current UTC date.
    today: Option<NaiveDate>,
}

impl KeywordIntentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves "today" and "tomorrow" against `today` instead of the clock.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    /// Classifies `text` and extracts its entities.
    pub fn classify(&self, text: &str) -> IntentResult {
        let lower = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        let intent = if has(&["book", "schedule", "appointment"]) {
            Intent::BookAppointment
        } else if has(&["reschedule", "change"]) {
            Intent::RescheduleAppointment
        } else if has(&["cancel"]) {
            Intent::CancelAppointment
        } else if has(&["find", "search"]) {
            Intent::FindProvider
        } else {
            Intent::Unknown
        };

        let mut entities = Entities::default();

        entities.service = if has(&["dental", "dentist"]) {
            Some("dental_checkup")
        } else if has(&["massage"]) {
            Some("massage_therapy")
        } else if has(&["consultation"]) {
            Some("consultation")
        } else {
            None
        }
        .map(str::to_string);

        entities.provider = if has(&["johnson"]) {
            Some("Dr. Sarah Johnson")
        } else if has(&["chen"]) {
            Some("Dr. Michael Chen")
        } else if has(&["maya", "spa"]) {
            Some("Maya Wellness Spa")
        } else {
            None
        }
        .map(str::to_string);

        entities.time_preference = ["morning", "afternoon", "evening"]
            .into_iter()
            .find(|w| lower.contains(w))
            .map(str::to_string);

        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        if has(&["today"]) {
            entities.date = Some(today.format("%Y-%m-%d").to_string());
        } else if has(&["tomorrow"]) {
            entities.date = today
                .checked_add_days(Days::new(1))
                .map(|d| d.format("%Y-%m-%d").to_string());
        } else if has(&["tuesday"]) {
            entities.day_of_week = Some("tuesday".to_string());
        } else if has(&["wednesday"]) {
            entities.day_of_week = Some("wednesday".to_string());
        }

        entities.urgency = if has(&["urgent", "emergency"]) {
            Urgency::High
        } else if has(&["soon", "asap"]) {
            Urgency::Medium
        } else {
            Urgency::Low
        };

        let response = respond(intent, &entities);
        IntentResult {
            intent,
            entities,
            confidence: KEYWORD_CONFIDENCE,
            original_text: text.to_string(),
            response,
        }
    }
}

#[async_trait]
impl IntentProcessor for KeywordIntentProcessor {
    async fn process(&self, text: &str) -> Result<Value, CollaboratorError> {
        let result = self.classify(text);
        tracing::debug!(intent = ?result.intent, "classified intent");
        Ok(serde_json::to_value(result)?)
    }
}
