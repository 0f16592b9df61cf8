use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single persisted session record.
///
/// `expiry` is always present. A record whose expiry has passed still carries
/// a usable refresh token and must be refreshed, not discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expiry: DateTime<Utc>,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            token_type: String::new(),
            access_token: String::new(),
            refresh_token: String::new(),
            expiry: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl Credentials {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && self.expiry > now
    }

    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Utc::now())
    }

    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.trim().is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenErrorResponse {
    pub fn into_message(self) -> String {
        match self.error_description {
            Some(description) if !description.trim().is_empty() => description,
            _ => self.error,
        }
    }
}
