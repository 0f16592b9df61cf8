use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("HOME is not set")]
    NoHome,
    #[error("could not marshal credentials")]
    Encode(#[source] serde_json::Error),
    #[error("could not write credentials file to '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not delete credentials file at '{}'", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Every failure an authenticated call can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The token endpoint refused a grant or could not be reached.
    /// `rejected` is set when the endpoint answered with a client error.
    #[error("{message}")]
    AuthenticationFailure { message: String, rejected: bool },
    #[error("credentials have expired, please try again")]
    AuthenticationExpired,
    #[error("{0}")]
    Upstream(String),
    #[error("an unknown error has occurred")]
    UnknownUpstream,
    #[error("could not marshal request")]
    Encoding(#[source] serde_json::Error),
    #[error("could not unmarshal upstream data")]
    Decoding(#[source] serde_json::Error),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error("could not read {what}")]
    Prompt {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn is_rejected_grant(&self) -> bool {
        matches!(
            self,
            ApiError::AuthenticationFailure { rejected: true, .. }
        )
    }
}
