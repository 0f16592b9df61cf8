mod actions;
pub(crate) mod args;
mod http;
pub(crate) mod types;

pub(crate) use actions::handle_transactions;
pub(crate) use types::{ContactRequest, MoneyBeam, MoneyBeamDetails, PastTransactionList, Recipient};
