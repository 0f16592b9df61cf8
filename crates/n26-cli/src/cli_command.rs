use tracing::info;

use crate::cli_args::*;
use crate::modules::account::{handle_account, handle_balance, handle_info, handle_stats};
use crate::modules::cards::handle_cards;
use crate::modules::spaces::handle_spaces;
use crate::modules::system::CommandContext;
use crate::modules::transactions::handle_transactions;

pub(crate) async fn handle_command(
    command: Command,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        Command::Info => handle_info(ctx).await?,
        Command::Account => handle_account(ctx).await?,
        Command::Balance => handle_balance(ctx).await?,
        Command::Stats(args) => handle_stats(args, ctx).await?,
        Command::Spaces(args) => handle_spaces(args, ctx).await?,
        Command::Cards(args) => handle_cards(args, ctx).await?,
        Command::Transactions(args) => handle_transactions(args, ctx).await?,
        Command::Logout => {
            let store = ctx.api.tokens().store();
            store.delete()?;
            info!(path = %store.path().display(), "credentials removed");
            ctx.render.message("Stored credentials removed.")?;
        }
    }

    Ok(())
}
