use chrono::{DateTime, Local, NaiveDate};

pub(crate) fn currency(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

/// Formats an upstream millisecond timestamp in local time.
pub(crate) fn format_millis(millis: i64, pattern: &str) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(ts) => ts.with_timezone(&Local).format(pattern).to_string(),
        None => millis.to_string(),
    }
}

pub(crate) fn parse_day(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("could not parse the provided dates"))
}

/// Milliseconds since the epoch at 00:00 UTC on `day`.
pub(crate) fn day_start_millis(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|start| start.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Upstream identifiers such as `ATM_DAILY_ACCOUNT` as display labels.
pub(crate) fn id_to_label(id: &str) -> String {
    id.to_lowercase()
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(currency(12.5, "EUR"), "12.50 EUR");
        assert_eq!(currency(-3.0, "EUR"), "-3.00 EUR");
    }

    #[test]
    fn days_parse_to_utc_midnight() {
        let day = parse_day("2018-01-31").expect("day");
        assert_eq!(day_start_millis(day), 1_517_356_800_000);
        assert!(parse_day("31/01/2018").is_err());
    }

    #[test]
    fn ids_become_labels() {
        assert_eq!(id_to_label("POS_DAILY_ACCOUNT"), "Pos Daily Account");
        assert_eq!(id_to_label("micro-v2-food"), "Micro-v2-food");
    }
}
