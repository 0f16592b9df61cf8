use super::http::{list_cards, list_limits};
use crate::cli_args::*;
use crate::modules::shared::Metadata;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_cards(
    args: CardsArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        CardsCommand::List => {
            let cards = list_cards(ctx.api).await?;
            ctx.render.emit(&cards, &Metadata::default())?;
        }
        CardsCommand::Limits => {
            let limits = list_limits(ctx.api).await?;
            ctx.render.emit(&limits, &Metadata::default())?;
        }
    }
    Ok(())
}
