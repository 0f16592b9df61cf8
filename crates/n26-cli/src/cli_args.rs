use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

pub use crate::modules::account::args::*;
pub use crate::modules::cards::args::*;
pub use crate::modules::spaces::args::*;
pub use crate::modules::transactions::args::*;
use crate::DEFAULT_REFRESH_MARGIN_SECONDS;

#[derive(Parser)]
#[command(name = "n26")]
#[command(about = "Command-line client for N26 bank accounts")]
pub struct Cli {
    #[arg(short = 'o', long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
    #[arg(long, env = "N26_API_URL")]
    pub api_url: Option<String>,
    #[arg(long, env = "N26_CREDENTIALS", help = "Path of the stored credentials")]
    pub credentials: Option<PathBuf>,
    #[arg(
        long,
        env = "N26_REFRESH_MARGIN",
        default_value_t = DEFAULT_REFRESH_MARGIN_SECONDS,
        help = "Seconds before the upstream expiry at which a token is considered expired"
    )]
    pub refresh_margin: u32,
    #[arg(
        long,
        env = "DEBUG",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "1",
        help = "Log every API call with its status and body"
    )]
    pub debug: Option<String>,
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[arg(long, help = "Allow http:// and invalid TLS certificates")]
    pub insecure: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Show personal information")]
    Info,
    #[command(about = "Show bank name, IBAN and BIC")]
    Account,
    #[command(about = "Show the current balance")]
    Balance,
    #[command(about = "Show income and expenses by category")]
    Stats(StatsArgs),
    Spaces(SpacesArgs),
    Cards(CardsArgs),
    Transactions(TransactionsArgs),
    #[command(about = "Forget the stored credentials")]
    Logout,
}
