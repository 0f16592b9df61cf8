use chrono::{Datelike, Local, Months, NaiveDate};

use super::http::{fetch_account, fetch_balance, fetch_personal_information, fetch_statistics};
use crate::cli_args::StatsArgs;
use crate::modules::shared::{day_start_millis, fetch_metadata, parse_day, Metadata};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_info(ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
    let info = fetch_personal_information(ctx.api).await?;
    ctx.render.emit(&info, &Metadata::default())
}

pub(crate) async fn handle_account(ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
    let account = fetch_account(ctx.api).await?;
    ctx.render.emit(&account, &Metadata::default())
}

pub(crate) async fn handle_balance(ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
    let balance = fetch_balance(ctx.api).await?;
    ctx.render.emit(&balance, &Metadata::default())
}

pub(crate) async fn handle_stats(
    args: StatsArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    let (from, to) = statistics_period(
        args.from.as_deref(),
        args.to.as_deref(),
        Local::now().date_naive(),
    )?;
    let meta = fetch_metadata(ctx.api).await?;
    let stats = fetch_statistics(ctx.api, from, to).await?;
    ctx.render.emit(&stats, &meta)
}

/// Millisecond bounds for the statistics call. Without dates the period is
/// the calendar month containing `today`, in local time.
pub(crate) fn statistics_period(
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
) -> anyhow::Result<(i64, i64)> {
    match (from, to) {
        (Some(from), Some(to)) => Ok((
            day_start_millis(parse_day(from)?),
            day_start_millis(parse_day(to)?),
        )),
        (None, None) => {
            let start = today.with_day(1).unwrap_or(today);
            let next = start.checked_add_months(Months::new(1)).unwrap_or(start);
            Ok((local_day_start_millis(start), local_day_start_millis(next) - 1000))
        }
        _ => anyhow::bail!("both 'from' and 'to' must be provided"),
    }
}

fn local_day_start_millis(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .and_then(|start| start.and_local_timezone(Local).earliest())
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| day_start_millis(day))
}
