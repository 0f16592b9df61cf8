mod prompt;
mod store;
mod tokens;
pub(crate) mod types;

pub(crate) use prompt::{Prompter, TerminalPrompter};
#[cfg(test)]
pub(crate) use prompt::ScriptedPrompter;
pub(crate) use store::CredentialStore;
pub(crate) use tokens::{Session, TokenManager};
pub(crate) use types::{Credentials, TokenErrorResponse, TokenResponse};
