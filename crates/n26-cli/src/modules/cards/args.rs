use clap::{Args, Subcommand};

#[derive(Args)]
pub struct CardsArgs {
    #[command(subcommand)]
    pub command: CardsCommand,
}

#[derive(Subcommand)]
pub enum CardsCommand {
    /// List the cards linked to the account
    List,
    /// Show daily payment and withdrawal limits
    Limits,
}
