mod actions;
mod format;
mod format_table;
mod http;
mod render;
pub(crate) mod types;

pub(crate) use actions::confirm;
pub(crate) use format::{currency, day_start_millis, format_millis, id_to_label, parse_day};
pub(crate) use format_table::{render_table, Cell};
pub(crate) use http::fetch_metadata;
pub(crate) use render::{Render, RenderContext, Style};
pub(crate) use types::{Category, Metadata};
