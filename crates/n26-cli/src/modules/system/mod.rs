mod client;
pub(crate) mod config;
mod errors;
mod request;
pub(crate) mod types;

pub(crate) use client::ApiClient;
pub(crate) use config::Settings;
pub(crate) use errors::{ApiError, CredentialsError};
pub(crate) use request::{build_params, opt_param, ApiRequest};
pub(crate) use types::{CommandContext, RetryState, UpstreamError};
