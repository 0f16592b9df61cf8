mod actions;
pub(crate) mod args;
mod http;
pub(crate) mod types;

pub(crate) use actions::{handle_account, handle_balance, handle_info, handle_stats};
pub(crate) use http::fetch_balance;
pub(crate) use types::{Account, Balance, PersonalInformation, Statistics};
