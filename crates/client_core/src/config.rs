use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_BASE: &str = "https://fsa-crud-2aa9294fe819.herokuapp.com/api";
pub const DEFAULT_COHORT: &str = "/2504-FTB-EB-WEB-FT";

/// Where the events API lives: a base URL plus the cohort path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub cohort: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            cohort: DEFAULT_COHORT.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, cohort: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cohort: cohort.into(),
        }
    }

    /// Base URL joined with the cohort segment, without a trailing slash.
    pub fn api_root(&self) -> Result<String, ClientError> {
        let base = self.base_url.trim().trim_end_matches('/');
        let cohort = self.cohort.trim().trim_matches('/');

        let parsed = Url::parse(base)
            .map_err(|err| ClientError::InvalidConfig(format!("base url '{base}': {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(format!(
                "base url '{base}' must use http or https"
            )));
        }

        if cohort.is_empty() {
            Ok(base.to_string())
        } else {
            Ok(format!("{base}/{cohort}"))
        }
    }
}
