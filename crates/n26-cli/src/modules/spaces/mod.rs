mod actions;
pub(crate) mod args;
mod http;
pub(crate) mod types;

pub(crate) use actions::handle_spaces;
pub(crate) use types::{Space, SpaceTransfer, Spaces};
