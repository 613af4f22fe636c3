//! Common data types used throughout the application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Persisted session envelope
///
/// The client keeps the authentication token under a single storage key as
/// `{ "state": { "token": "..." } }`. Any other shape is treated as "no
/// session" by [`SessionEnvelope::parse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnvelope {
    pub state: SessionState,
}

/// Inner state of the persisted session envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub token: Option<String>,
}

impl SessionEnvelope {
    /// Wrap a token in the persisted envelope shape.
    pub fn new(token: impl Into<String>) -> Self {
        Self { state: SessionState { token: Some(token.into()) } }
    }

    /// Parse a raw stored value into a token.
    ///
    /// Fail-open: malformed JSON, a missing `state` object, an absent token
    /// field or an empty token all yield `None`. This function never errors.
    pub fn parse(raw: &str) -> Option<String> {
        serde_json::from_str::<Self>(raw)
            .ok()
            .and_then(|envelope| envelope.state.token)
            .filter(|token| !token.is_empty())
    }
}

/// Login credentials submitted by the admin login form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login response from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Public announcement shown on the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

/// Payload for creating or updating an announcement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub body: String,
}

/// Entry in the club's "historical moments" gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalMoment {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub image_url: String,
}

/// Payload for creating a historical moment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHistoricalMoment {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub image_url: String,
}

/// Image shown in the home page slider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderImage {
    pub id: i64,
    pub image_url: String,
    pub caption: Option<String>,
    pub position: u32,
}

/// Payload for adding a slider image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSliderImage {
    pub image_url: String,
    pub caption: Option<String>,
    pub position: u32,
}

/// Monetary donation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: i64,
    pub donor_name: String,
    pub amount_cents: i64,
    pub donated_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// Payload for recording a donation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonation {
    pub donor_name: String,
    pub amount_cents: i64,
    pub note: Option<String>,
}

/// Entry in the blood-donor directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodDonor {
    pub id: i64,
    pub name: String,
    pub blood_group: String,
    pub phone: String,
    pub city: String,
    pub last_donation: Option<NaiveDate>,
}

/// Payload for registering a blood donor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBloodDonor {
    pub name: String,
    pub blood_group: String,
    pub phone: String,
    pub city: String,
    pub last_donation: Option<NaiveDate>,
}

/// Club event (courses and exams are published as events too)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a club event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClubEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Backend response for an uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_envelope() {
        let raw = r#"{"state":{"token":"abc123"}}"#;
        assert_eq!(SessionEnvelope::parse(raw), Some("abc123".to_string()));
    }

    #[test]
    fn test_parse_malformed_json_is_none() {
        assert_eq!(SessionEnvelope::parse("not json"), None);
    }

    #[test]
    fn test_parse_wrong_shape_is_none() {
        assert_eq!(SessionEnvelope::parse(r#"{"token":"abc"}"#), None);
        assert_eq!(SessionEnvelope::parse(r#"{"state":[]}"#), None);
        assert_eq!(SessionEnvelope::parse("null"), None);
    }

    #[test]
    fn test_parse_absent_or_empty_token_is_none() {
        assert_eq!(SessionEnvelope::parse(r#"{"state":{}}"#), None);
        assert_eq!(SessionEnvelope::parse(r#"{"state":{"token":""}}"#), None);
        assert_eq!(SessionEnvelope::parse(r#"{"state":{"token":null}}"#), None);
    }

    #[test]
    fn test_envelope_round_trip() {
        let raw = serde_json::to_string(&SessionEnvelope::new("tok")).unwrap();
        assert_eq!(SessionEnvelope::parse(&raw), Some("tok".to_string()));
    }
}
