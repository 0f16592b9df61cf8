use anyhow::Context;

use super::http::{create_transfer, list_spaces};
use crate::cli_args::*;
use crate::modules::shared::{
    confirm, currency, render_table, Cell, Metadata, RenderContext, Style,
};
use crate::modules::spaces::{Space, SpaceTransfer};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_spaces(
    args: SpacesArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        SpacesCommand::List => {
            let spaces = list_spaces(ctx.api).await?;
            ctx.render.emit(&spaces, &Metadata::default())?;
        }
        SpacesCommand::Transfer(args) => transfer(args, ctx).await?,
    }
    Ok(())
}

async fn transfer(args: SpacesTransferArgs, ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
    let spaces = list_spaces(ctx.api)
        .await
        .context("could not get your spaces")?;
    let (Some(from), Some(to)) = (spaces.find(&args.from), spaces.find(&args.to)) else {
        anyhow::bail!("could not find the provided spaces");
    };

    print!("{}", transfer_summary(&ctx.render, from, to, args.amount));
    confirm(
        ctx.prompter,
        "Are you sure you want to perform the transfer?",
    )?;

    let payload = SpaceTransfer {
        amount: args.amount,
        from_space_id: from.id.clone(),
        to_space_id: to.id.clone(),
    };
    create_transfer(ctx.api, &payload).await?;

    ctx.render.message(&format!(
        "Your transfer of {} has been performed.",
        currency(args.amount, &from.balance.currency)
    ))
}

fn transfer_summary(ctx: &RenderContext, from: &Space, to: &Space, amount: f64) -> String {
    let mut out = String::new();
    ctx.title(
        &mut out,
        "Please confirm you want to perform the following transfer",
    );
    out.push('\n');
    let rows = vec![
        vec![
            Cell::new(from.name.as_str(), Style::Error),
            Cell::plain("→"),
            Cell::plain(currency(amount, &from.balance.currency)),
            Cell::plain("→"),
            Cell::new(to.name.as_str(), Style::Ok),
        ],
        vec![
            Cell::new(from.id.as_str(), Style::Faint),
            Cell::plain(""),
            Cell::plain(""),
            Cell::plain(""),
            Cell::new(to.id.as_str(), Style::Faint),
        ],
        vec![
            Cell::plain(currency(
                from.balance.available_balance,
                &from.balance.currency,
            )),
            Cell::plain(""),
            Cell::plain(""),
            Cell::plain(""),
            Cell::plain(currency(to.balance.available_balance, &to.balance.currency)),
        ],
    ];
    out.push_str(&render_table(ctx, &[], &rows));
    out.push('\n');
    out
}
