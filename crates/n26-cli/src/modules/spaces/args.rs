use clap::{Args, Subcommand};

#[derive(Args)]
pub struct SpacesArgs {
    #[command(subcommand)]
    pub command: SpacesCommand,
}

#[derive(Subcommand)]
pub enum SpacesCommand {
    /// List spaces with their balances and goals
    List,
    /// Move money between two spaces
    Transfer(SpacesTransferArgs),
}

#[derive(Args)]
pub struct SpacesTransferArgs {
    /// Source space, by ID or name
    pub from: String,
    /// Destination space, by ID or name
    pub to: String,
    pub amount: f64,
}
