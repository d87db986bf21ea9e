use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::countdown;
use crate::error::ValidationError;
use crate::timezone;

/// A named target date.
///
/// Serialized with camelCase keys so the stored blob keeps the field names
/// older clients wrote (`backgroundImage`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque identifier. Carries no meaning beyond identity. Older records
    /// may store it as a bare number.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// When the countdown was created. Absent on records written before the
    /// field existed; see [`Event::creation_instant`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    /// `HH:MM`, 24-hour, local to `timezone`
    #[serde(default)]
    pub time: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

fn default_timezone() -> String {
    timezone::LOCAL.to_string()
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// The editable fields of an event, as entered in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
    pub background_image: Option<String>,
    pub category: Option<String>,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            time: String::new(),
            timezone: default_timezone(),
            background_image: None,
            category: None,
        }
    }
}

/// Fields pulled out of an image by the oracle. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(default)]
    pub title: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// `HH:MM`
    #[serde(default)]
    pub time: Option<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        [&self.title, &self.date, &self.time]
            .iter()
            .all(|f| non_empty(f).is_none())
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl EventDraft {
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            timezone: event.timezone.clone(),
            background_image: event.background_image.clone(),
            category: event.category.clone(),
        }
    }

    /// Required-field check. Title must contain something besides whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.date.is_empty() {
            return Err(ValidationError::MissingField("date"));
        }
        if self.time.is_empty() {
            return Err(ValidationError::MissingField("time"));
        }
        Ok(())
    }

    pub fn target(&self) -> DateTime<Utc> {
        countdown::resolve(&self.date, &self.time, &self.timezone)
    }

    /// Fill in fields read from an image. Empty values leave the form alone.
    pub fn merge_extracted(&mut self, fields: &ExtractedFields) {
        if let Some(title) = non_empty(&fields.title) {
            self.title = title.to_string();
        }
        if let Some(date) = non_empty(&fields.date) {
            self.date = date.to_string();
        }
        if let Some(time) = non_empty(&fields.time) {
            self.time = time.to_string();
        }
    }
}

impl Event {
    /// New event with a fresh identifier, created at `now`.
    pub fn new(draft: EventDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Some(now),
            title: draft.title,
            date: draft.date,
            time: draft.time,
            timezone: draft.timezone,
            background_image: draft.background_image,
            category: draft.category,
        }
    }

    /// Overwrite editable fields. Identity, creation time and (unless the
    /// draft names one) category are kept.
    pub fn apply(&mut self, draft: EventDraft) {
        self.title = draft.title;
        self.date = draft.date;
        self.time = draft.time;
        self.timezone = draft.timezone;
        self.background_image = draft.background_image;
        if draft.category.is_some() {
            self.category = draft.category;
        }
    }

    pub fn target(&self) -> DateTime<Utc> {
        countdown::resolve(&self.date, &self.time, &self.timezone)
    }

    /// Start of the progress span.
    ///
    /// Records without `createdAt` used a millisecond timestamp as their id;
    /// that is honoured as a fallback. Anything else has no known start.
    pub fn creation_instant(&self) -> Option<DateTime<Utc>> {
        self.created_at.or_else(|| {
            self.id
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
        })
    }
}
