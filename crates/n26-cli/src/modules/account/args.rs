use clap::Args;

#[derive(Args)]
pub struct StatsArgs {
    /// First day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day of the period (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}
