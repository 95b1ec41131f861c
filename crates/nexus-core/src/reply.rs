//! Canned conversational replies for a classified intent.
//!
//! [`respond`] is deterministic: the reply depends only on the intent and
//! the extracted entities, never on the clock or on any calendar.

use serde::{Deserialize, Serialize};

use crate::intent::{Entities, Intent, Urgency};

/// What the assistant says back, plus follow-ups the client can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    pub message: String,
    pub suggestions: Vec<String>,
    /// Machine-readable follow-ups; omitted when there are none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<String>,
}

impl AgentReply {
    fn new(message: String, suggestions: &[&str], next_actions: &[&str]) -> Self {
        Self {
            message,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            next_actions: next_actions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const APPOINTMENT_SUGGESTIONS: [&str; 3] = [
    "Dental appointment on Tuesday",
    "Massage on Friday",
    "Show all appointments",
];

/// Builds the reply for `intent`.
pub fn respond(intent: Intent, entities: &Entities) -> AgentReply {
    match intent {
        Intent::BookAppointment => booking_reply(entities),
        Intent::RescheduleAppointment => AgentReply::new(
            "I can help you reschedule your appointment. Let me check your upcoming \
             bookings and find alternative slots. Which appointment would you like to \
             reschedule?"
                .to_string(),
            &APPOINTMENT_SUGGESTIONS,
            &["select_appointment", "view_appointments"],
        ),
        Intent::CancelAppointment => AgentReply::new(
            "I can help you cancel your appointment. Let me pull up your upcoming \
             bookings. Which appointment would you like to cancel? I'll also check if \
             there are any cancellation policies that apply."
                .to_string(),
            &APPOINTMENT_SUGGESTIONS,
            &["select_appointment", "view_appointments"],
        ),
        Intent::FindProvider => {
            let service = entities.service.as_deref().unwrap_or("service");
            AgentReply::new(
                format!(
                    "I found several providers for {service} in your area. Here are the \
                     top-rated options with availability this week:"
                ),
                &[
                    "Dr. Sarah Johnson (Dentistry)",
                    "Maya Wellness Spa (Massage)",
                    "Dr. Michael Chen (General)",
                ],
                &["select_provider", "view_more_providers"],
            )
        }
        Intent::Unknown => AgentReply::new(
            "I'm sorry, I didn't quite understand that. Could you please try again? You \
             can say things like 'Book me a dental appointment' or 'Reschedule my \
             appointment with Dr. Johnson'."
                .to_string(),
            &[
                "Book a dental appointment",
                "Find available massage therapists",
                "Reschedule my appointment",
                "Cancel my appointment",
            ],
            &[],
        ),
    }
}

fn booking_reply(entities: &Entities) -> AgentReply {
    let service = entities.service.as_deref().unwrap_or("appointment");
    let provider = entities.provider.as_deref().unwrap_or("available provider");

    if entities.urgency == Urgency::High {
        return AgentReply::new(
            format!(
                "I understand this is urgent. Let me find the earliest available slot for \
                 {service} with {provider}. I found an emergency slot today at 4:30 PM. \
                 Would you like me to book this?"
            ),
            &["Yes, book it", "Find other times", "Call the provider"],
            &["confirm_booking", "find_alternatives", "contact_provider"],
        );
    }

    let time = entities
        .time_preference
        .as_deref()
        .unwrap_or("your preferred time");
    AgentReply::new(
        format!(
            "I can help you book {service} with {provider}. I found several available \
             slots for {time}. Would you prefer Tuesday at 10:30 AM, Wednesday at 2:00 PM, \
             or Friday at 11:00 AM?"
        ),
        &[
            "Tuesday 10:30 AM",
            "Wednesday 2:00 PM",
            "Friday 11:00 AM",
            "Show more times",
        ],
        &["select_slot", "find_more_slots"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities() -> Entities {
        Entities::default()
    }

    #[test]
    fn booking_names_service_provider_and_time() {
        let reply = respond(
            Intent::BookAppointment,
            &Entities {
                service: Some("dental_checkup".into()),
                provider: Some("Dr. Sarah Johnson".into()),
                time_preference: Some("morning".into()),
                ..entities()
            },
        );
        assert!(reply
            .message
            .starts_with("I can help you book dental_checkup with Dr. Sarah Johnson."));
        assert!(reply.message.contains("slots for morning"));
        assert_eq!(reply.suggestions.len(), 4);
        assert_eq!(reply.next_actions, vec!["select_slot", "find_more_slots"]);
    }

    #[test]
    fn booking_without_entities_uses_placeholders() {
        let reply = respond(Intent::BookAppointment, &entities());
        assert!(reply
            .message
            .contains("book appointment with available provider"));
        assert!(reply.message.contains("slots for your preferred time"));
    }

    #[test]
    fn urgent_booking_offers_emergency_slot() {
        let reply = respond(
            Intent::BookAppointment,
            &Entities {
                urgency: Urgency::High,
                ..entities()
            },
        );
        assert!(reply.message.starts_with("I understand this is urgent."));
        assert!(reply.message.contains("emergency slot today at 4:30 PM"));
        assert_eq!(
            reply.suggestions,
            vec!["Yes, book it", "Find other times", "Call the provider"]
        );
        assert_eq!(
            reply.next_actions,
            vec!["confirm_booking", "find_alternatives", "contact_provider"]
        );
    }

    #[test]
    fn medium_urgency_is_not_an_emergency() {
        let reply = respond(
            Intent::BookAppointment,
            &Entities {
                urgency: Urgency::Medium,
                ..entities()
            },
        );
        assert_eq!(reply.next_actions, vec!["select_slot", "find_more_slots"]);
    }

    #[test]
    fn reschedule_and_cancel_ask_which_appointment() {
        let reschedule = respond(Intent::RescheduleAppointment, &entities());
        assert!(reschedule
            .message
            .contains("Which appointment would you like to reschedule?"));

        let cancel = respond(Intent::CancelAppointment, &entities());
        assert!(cancel.message.contains("cancellation policies"));

        for reply in [reschedule, cancel] {
            assert_eq!(reply.suggestions, APPOINTMENT_SUGGESTIONS);
            assert_eq!(
                reply.next_actions,
                vec!["select_appointment", "view_appointments"]
            );
        }
    }

    #[test]
    fn provider_search_mentions_service() {
        let reply = respond(
            Intent::FindProvider,
            &Entities {
                service: Some("massage_therapy".into()),
                ..entities()
            },
        );
        assert!(reply
            .message
            .starts_with("I found several providers for massage_therapy in your area."));
        assert_eq!(reply.next_actions, vec!["select_provider", "view_more_providers"]);

        let generic = respond(Intent::FindProvider, &entities());
        assert!(generic.message.contains("providers for service in"));
    }

    #[test]
    fn unknown_offers_examples_without_actions() {
        let reply = respond(Intent::Unknown, &entities());
        assert!(reply.message.starts_with("I'm sorry, I didn't quite understand that."));
        assert_eq!(reply.suggestions[0], "Book a dental appointment");
        assert!(reply.next_actions.is_empty());

        let value = serde_json::to_value(&reply).unwrap();
        assert!(value.get("nextActions").is_none());
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let value = serde_json::to_value(respond(Intent::CancelAppointment, &entities())).unwrap();
        assert_eq!(value["nextActions"][0], "select_appointment");
        assert_eq!(value["suggestions"].as_array().unwrap().len(), 3);
    }
}
