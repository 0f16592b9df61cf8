use std::io::IsTerminal;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::auth::{Prompter, TerminalPrompter};
use crate::modules::system::{CommandContext, Settings};

pub(crate) const DEFAULT_API_URL: &str = "https://api.tech26.de";
pub(crate) const CLIENT_ID: &str = "android";
pub(crate) const CLIENT_SECRET: &str = "secret";
pub(crate) const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 3600;
pub(crate) const DEFAULT_REFRESH_MARGIN_SECONDS: u32 = 600;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;
    let ansi = !cli.no_color && std::io::stderr().is_terminal();
    init_logging(cli.verbose, settings.diagnostics, ansi)?;

    let http = reqwest::Client::builder()
        .danger_accept_invalid_certs(cli.insecure)
        .build()?;
    let prompter: Arc<dyn Prompter> = Arc::new(TerminalPrompter);
    let mut api = settings.api_client(http, prompter.clone());

    let mut ctx = CommandContext {
        api: &mut api,
        render: settings.render_context(),
        prompter: prompter.as_ref(),
    };
    handle_command(cli.command, &mut ctx).await
}

fn init_logging(verbosity: u8, diagnostics: bool, ansi: bool) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 if diagnostics => "info",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
