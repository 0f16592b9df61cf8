pub(crate) mod account;
pub(crate) mod auth;
pub(crate) mod cards;
pub(crate) mod shared;
pub(crate) mod spaces;
pub(crate) mod system;
pub(crate) mod transactions;
