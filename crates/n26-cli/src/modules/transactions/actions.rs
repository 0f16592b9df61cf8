use anyhow::Context;

use super::http::{check_contact, create_money_beam, list_transactions};
use crate::cli_args::*;
use crate::modules::account::{fetch_balance, Balance};
use crate::modules::shared::{
    confirm, currency, day_start_millis, fetch_metadata, parse_day, render_table, Cell,
    RenderContext, Style,
};
use crate::modules::system::{build_params, opt_param, ApiError, CommandContext};
use crate::modules::transactions::{MoneyBeam, MoneyBeamDetails, Recipient};

pub(crate) async fn handle_transactions(
    args: TransactionsArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        TransactionsCommand::List(args) => {
            let params = list_params(args.limit, args.from.as_deref(), args.to.as_deref())?;
            let meta = fetch_metadata(ctx.api).await?;
            let transactions = list_transactions(ctx.api, params).await?;
            ctx.render.emit(&transactions, &meta)?;
        }
        TransactionsCommand::Beam(args) => beam(args, ctx).await?,
    }
    Ok(())
}

pub(crate) fn list_params(
    limit: u32,
    from: Option<&str>,
    to: Option<&str>,
) -> anyhow::Result<Vec<(String, String)>> {
    let period = match (from, to) {
        (Some(from), Some(to)) => Some((
            day_start_millis(parse_day(from)?),
            day_start_millis(parse_day(to)?),
        )),
        (None, None) => None,
        _ => anyhow::bail!("both 'from' and 'to' must be provided"),
    };
    Ok(build_params([
        Some(("limit".to_string(), limit.to_string())),
        opt_param("from", period.map(|(from, _)| from.to_string())),
        opt_param("to", period.map(|(_, to)| to.to_string())),
    ]))
}

async fn beam(args: TransactionsBeamArgs, ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
    let recipient = Recipient::parse(&args.recipient)?;
    ensure_customer(ctx, &recipient).await?;

    let details = MoneyBeamDetails::new(&recipient, args.name, args.amount, args.comment);
    let balance = fetch_balance(ctx.api)
        .await
        .context("could not get current balance")?;

    print!("{}", beam_summary(&ctx.render, &details, &recipient, &balance));
    confirm(
        ctx.prompter,
        "Are you sure you want to perform the transfer?",
    )?;
    let pin = ctx
        .prompter
        .read_secret("Enter your PIN: ")
        .map_err(|_| anyhow::anyhow!("could not read PIN"))?;

    let payload = MoneyBeam {
        pin,
        transaction: details,
    };
    create_money_beam(ctx.api, &payload).await?;

    ctx.render.message(&format!(
        "Your transfer of {} has been requested, please confirm from your paired device.",
        currency(payload.transaction.amount, &balance.currency)
    ))
}

async fn ensure_customer(
    ctx: &mut CommandContext<'_>,
    recipient: &Recipient,
) -> anyhow::Result<()> {
    let contacts = match check_contact(ctx.api, recipient.as_str()).await {
        Ok(contacts) => contacts,
        Err(ApiError::Upstream(_) | ApiError::UnknownUpstream) => Vec::new(),
        Err(err) => return Err(err.into()),
    };
    if contacts.is_empty() {
        anyhow::bail!("the provided recipient ID is not associated with an N26 account");
    }
    Ok(())
}

fn beam_summary(
    ctx: &RenderContext,
    details: &MoneyBeamDetails,
    recipient: &Recipient,
    balance: &Balance,
) -> String {
    let mut out = String::new();
    ctx.title(
        &mut out,
        "Please confirm you want to perform the following transfer",
    );
    out.push_str(
        "You will be asked for your PIN and will have to confirm the transfer from your paired device.\n\n",
    );
    let rows = vec![
        vec![
            Cell::new("Main Account", Style::Error),
            Cell::plain("→"),
            Cell::plain(currency(details.amount, &balance.currency)),
            Cell::plain("→"),
            Cell::new(details.partner_name.as_str(), Style::Ok),
        ],
        vec![
            Cell::plain(currency(balance.available_balance, &balance.currency)),
            Cell::plain(""),
            Cell::plain(details.reference_text.as_deref().unwrap_or_default()),
            Cell::plain(""),
            Cell::new(recipient.as_str(), Style::Faint),
        ],
    ];
    out.push_str(&render_table(ctx, &[], &rows));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_always_carry_the_limit() {
        assert_eq!(
            list_params(50, None, None).expect("params"),
            vec![("limit".to_string(), "50".to_string())]
        );
    }

    #[test]
    fn list_params_convert_days_to_millis() {
        let params = list_params(5, Some("2018-01-01"), Some("2018-01-31")).expect("params");
        assert_eq!(
            params,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("from".to_string(), "1514764800000".to_string()),
                ("to".to_string(), "1517356800000".to_string()),
            ]
        );
    }

    #[test]
    fn list_params_need_both_days() {
        let err = list_params(5, Some("2018-01-01"), None).expect_err("must fail");
        assert_eq!(err.to_string(), "both 'from' and 'to' must be provided");
        let err = list_params(5, None, Some("2018-01-31")).expect_err("must fail");
        assert_eq!(err.to_string(), "both 'from' and 'to' must be provided");
    }
}
