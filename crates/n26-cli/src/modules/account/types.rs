use serde::{Deserialize, Serialize};

use crate::modules::shared::{
    currency, format_millis, render_table, Cell, Metadata, Render, RenderContext,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub birth_date: i64,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub signup_completed: bool,
    #[serde(default)]
    pub mobile_phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "bankName", default)]
    pub bank: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub bic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub available_balance: f64,
    #[serde(default)]
    pub usable_balance: f64,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub from: i64,
    pub to: i64,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expense: f64,
    #[serde(default)]
    pub items: Vec<CategoryMovement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMovement {
    #[serde(rename = "id")]
    pub category: String,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub expense: f64,
}

const PROGRESS_STEP: f64 = 2.0;

impl Render for PersonalInformation {
    fn pretty(&self, ctx: &RenderContext, _meta: &Metadata) -> String {
        let mut out = String::new();
        ctx.title(&mut out, "Card holder");
        ctx.attr(
            &mut out,
            "Name",
            &format!("{} {}", self.first_name, self.last_name),
        );
        ctx.attr(&mut out, "E-mail address", &self.email);
        ctx.attr(&mut out, "Phone number", &self.mobile_phone_number);
        ctx.attr(
            &mut out,
            "Birth date",
            &format_millis(self.birth_date, "%d %b %Y"),
        );
        ctx.attr(&mut out, "Nationality", &self.nationality);
        out
    }
}

impl Render for Account {
    fn pretty(&self, ctx: &RenderContext, _meta: &Metadata) -> String {
        let mut out = String::new();
        ctx.title(&mut out, "Account information");
        ctx.attr(&mut out, "Bank name", &self.bank);
        ctx.attr(&mut out, "IBAN", &self.iban);
        ctx.attr(&mut out, "BIC", &self.bic);
        out
    }
}

impl Render for Balance {
    fn pretty(&self, ctx: &RenderContext, _meta: &Metadata) -> String {
        let mut out = String::new();
        ctx.title(&mut out, "Account balance");
        ctx.attr(
            &mut out,
            "Balance",
            &currency(self.available_balance, &self.currency),
        );
        if self.available_balance != self.usable_balance {
            ctx.attr(
                &mut out,
                "Usable balance",
                &currency(self.usable_balance, &self.currency),
            );
        }
        out
    }
}

impl Statistics {
    fn breakdown(
        &self,
        ctx: &RenderContext,
        meta: &Metadata,
        label: &str,
        total: f64,
        pick: fn(&CategoryMovement) -> f64,
    ) -> String {
        let mut movements: Vec<&CategoryMovement> = self.items.iter().collect();
        movements.sort_by(|a, b| pick(b).total_cmp(&pick(a)));

        let rows = movements
            .into_iter()
            .map(|movement| {
                let value = pick(movement);
                let pct = share(value, total);
                vec![
                    Cell::plain(meta.category(&movement.category)),
                    Cell::plain(format!("{value:.2}")),
                    Cell::plain(format!("{pct:.1} %")),
                    Cell::plain(progress_bar(pct)),
                ]
            })
            .collect::<Vec<_>>();
        let pct_header = format!("{label} %");
        render_table(ctx, &["Category", label, &pct_header], &rows)
    }
}

impl Render for Statistics {
    fn pretty(&self, ctx: &RenderContext, meta: &Metadata) -> String {
        let mut out = String::new();
        ctx.title(&mut out, "Global movements");
        ctx.attr(
            &mut out,
            "Period",
            &format!(
                "{} - {}",
                format_millis(self.from, "%d %b %Y"),
                format_millis(self.to, "%d %b %Y")
            ),
        );
        ctx.attr(&mut out, "Income", &format!("{:.2}", self.total_income));
        ctx.attr(&mut out, "Expense", &format!("{:.2}", self.total_expense));

        out.push('\n');
        ctx.title(&mut out, "Income by category");
        out.push('\n');
        out.push_str(&self.breakdown(ctx, meta, "Income", self.total_income, |m| m.income));

        out.push('\n');
        ctx.title(&mut out, "Expense by category");
        out.push('\n');
        out.push_str(&self.breakdown(ctx, meta, "Expense", self.total_expense, |m| {
            m.expense
        }));
        out
    }
}

/// Percentage of `total`; zero when there is nothing to divide by.
fn share(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        value / total * 100.0
    }
}

fn progress_bar(pct: f64) -> String {
    let steps = (pct.max(0.0).trunc() / PROGRESS_STEP).trunc() as usize;
    "▪".repeat(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_args::OutputFormat;
    use crate::modules::shared::Category;

    fn plain() -> RenderContext {
        RenderContext::new(OutputFormat::Pretty, false)
    }

    #[test]
    fn account_decodes_upstream_names() {
        let account: Account =
            serde_json::from_str(r#"{"bankName":"N26 Bank","iban":"DE00","bic":"NTSBDEB1"}"#)
                .expect("account");

        let out = account.pretty(&plain(), &Metadata::default());

        assert_eq!(
            out,
            "Account information:\n  Bank name: N26 Bank\n  IBAN: DE00\n  BIC: NTSBDEB1\n"
        );
    }

    #[test]
    fn usable_balance_is_shown_only_when_it_differs() {
        let same = Balance {
            available_balance: 10.0,
            usable_balance: 10.0,
            currency: "EUR".to_string(),
        };
        let differs = Balance {
            usable_balance: 4.5,
            ..same.clone()
        };

        assert!(!same
            .pretty(&plain(), &Metadata::default())
            .contains("Usable"));
        assert!(differs
            .pretty(&plain(), &Metadata::default())
            .contains("Usable balance: 4.50 EUR"));
    }

    #[test]
    fn statistics_without_totals_do_not_divide_by_zero() {
        let stats: Statistics = serde_json::from_str(
            r#"{"from":0,"to":0,"totalIncome":0,"totalExpense":0,
                "items":[{"id":"micro-v2-food","income":0,"expense":0}]}"#,
        )
        .expect("stats");
        let meta = Metadata::from_categories(vec![Category {
            id: "micro-v2-food".to_string(),
            name: "Food".to_string(),
        }]);

        let out = stats.pretty(&plain(), &meta);

        assert!(out.contains("Food"));
        assert!(out.contains("0.0 %"));
        assert!(!out.contains("NaN"));
    }

    #[test]
    fn progress_bar_has_one_mark_per_two_percent() {
        assert_eq!(progress_bar(50.0), "▪".repeat(25));
        assert_eq!(progress_bar(1.9), "");
        assert_eq!(progress_bar(-4.0), "");
    }
}
