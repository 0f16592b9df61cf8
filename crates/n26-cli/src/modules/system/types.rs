use serde::Deserialize;

use crate::modules::auth::Prompter;
use crate::modules::shared::RenderContext;
use crate::modules::system::ApiClient;

/// Everything a command handler needs.
pub struct CommandContext<'a> {
    pub api: &'a mut ApiClient,
    pub render: RenderContext,
    pub prompter: &'a dyn Prompter,
}

/// Error body the account API sends with any status of 400 and above.
#[derive(Debug, Default, Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
}

/// Single-retry policy for one call: a 401 moves `Fresh` to `Retried`,
/// a second 401 has nowhere to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Fresh,
    Retried,
}

impl RetryState {
    pub fn after_unauthorized(self) -> Option<RetryState> {
        match self {
            RetryState::Fresh => Some(RetryState::Retried),
            RetryState::Retried => None,
        }
    }
}
