use chrono::NaiveDate;
use shared::protocol::NewParty;
use thiserror::Error;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Raw values of the new-party form as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPartyDraft {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

impl NewPartyDraft {
    /// Checks the required fields and turns the picked day into midnight UTC.
    pub fn into_new_party(self) -> Result<NewParty, DraftError> {
        let required = [
            ("name", &self.name),
            ("description", &self.description),
            ("date", &self.date),
            ("location", &self.location),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(DraftError::MissingField(*field));
        }

        let day = NaiveDate::parse_from_str(self.date.trim(), DATE_INPUT_FORMAT)
            .map_err(|_| DraftError::InvalidDate(self.date.clone()))?;
        let date = day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| DraftError::InvalidDate(self.date.clone()))?
            .and_utc();

        Ok(NewParty {
            name: self.name,
            description: self.description,
            date,
            location: self.location,
        })
    }
}
