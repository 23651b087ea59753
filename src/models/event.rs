use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::utils::datetime;

/// Event as returned by `GET /events`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "datetime::flexible")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[serde(default, with = "datetime::flexible_option")]
    pub created_at: Option<NaiveDateTime>,
}

impl Event {
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description available.")
    }

    pub fn location_or_default(&self) -> &str {
        self.location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or("TBA")
    }
}

/// Body of `POST /events`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "datetime::flexible")]
    pub date: NaiveDateTime,
    pub location: Option<String>,
    pub max_attendees: Option<u32>,
}

/// Raw values of the create-event form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub max_attendees: String,
}

impl EventDraft {
    /// Validates the form against `now`. Empty optional fields become `None`.
    pub fn validate(&self, now: NaiveDateTime) -> Result<NewEvent, ValidationError> {
        let title = self.title.trim();
        let raw_date = self.date.trim();
        if title.is_empty() || raw_date.is_empty() {
            return Err(ValidationError::MissingEventFields);
        }

        let date = datetime::parse_timestamp(raw_date).ok_or(ValidationError::InvalidDate)?;
        if date <= now {
            return Err(ValidationError::DateNotInFuture);
        }

        let max_attendees = match self.max_attendees.trim() {
            "" => None,
            raw => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => return Err(ValidationError::InvalidMaxAttendees),
            },
        };

        Ok(NewEvent {
            title: title.to_string(),
            description: non_empty(&self.description),
            date,
            location: non_empty(&self.location),
            max_attendees,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
