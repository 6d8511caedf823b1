use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{GuestId, PartyId, RsvpId};

/// A party as the events endpoint returns it. `date` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

impl Party {
    /// The calendar-date part of `date` (everything before the time component).
    pub fn date_portion(&self) -> &str {
        match self.date.split_once('T') {
            Some((day, _)) => day,
            None => self.date.get(..10).unwrap_or(&self.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RsvpId>,
    pub guest_id: GuestId,
    pub event_id: PartyId,
}

/// Body of the create-party request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParty {
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub date: DateTime<Utc>,
    pub location: String,
}

fn serialize_iso_millis<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Wrapper every read endpoint puts around its payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    pub data: T,
}

/// Write endpoints: only the outcome flags are read, the payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl Acknowledgement {
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }

    pub fn error_message(&self) -> String {
        match &self.error {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(serde_json::Value::Object(fields)) => fields
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| serde_json::Value::Object(fields.clone()).to_string()),
            Some(other) => other.to_string(),
            None => "request rejected by server".to_string(),
        }
    }
}
