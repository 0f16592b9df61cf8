use clap::{Args, Subcommand};

#[derive(Args)]
pub struct TransactionsArgs {
    #[command(subcommand)]
    pub command: TransactionsCommand,
}

#[derive(Subcommand)]
pub enum TransactionsCommand {
    /// List past transactions
    List(TransactionsListArgs),
    /// Send a Money Beam to another N26 customer
    Beam(TransactionsBeamArgs),
}

#[derive(Args)]
pub struct TransactionsListArgs {
    /// First day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Number of transactions to display
    #[arg(short, long, default_value_t = 50)]
    pub limit: u32,
}

#[derive(Args)]
pub struct TransactionsBeamArgs {
    /// Email address or phone number (starting with '+') of the recipient
    pub recipient: String,
    pub amount: f64,
    /// Name of the recipient
    #[arg(short, long)]
    pub name: Option<String>,
    /// Reference text added to the transfer
    #[arg(short, long)]
    pub comment: Option<String>,
}
