use serde::{Deserialize, Serialize};

use crate::modules::shared::{
    currency, format_millis, render_table, Cell, Metadata, Render, RenderContext, Style,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastTransaction {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "visibleTS", default)]
    pub visible_ts: i64,
    pub amount: f64,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub partner_name: String,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub merchant_name: String,
    #[serde(default)]
    pub merchant_city: String,
    #[serde(default)]
    pub merchant_country: String,
    #[serde(default)]
    pub reference_text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub payment_scheme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PastTransactionList(pub Vec<PastTransaction>);

impl PastTransaction {
    /// Counterparty shown to the user.
    pub fn third_party(&self) -> &str {
        if self.payment_scheme == "SPACES" {
            "N26 Spaces"
        } else if !self.partner_name.is_empty() {
            &self.partner_name
        } else {
            &self.merchant_name
        }
    }

    fn amount_cell(&self) -> Cell {
        if self.amount < 0.0 {
            Cell::new(
                format!("→ {}", currency(self.amount.abs(), &self.currency_code)),
                Style::Error,
            )
        } else {
            Cell::new(
                format!("← {}", currency(self.amount, &self.currency_code)),
                Style::Ok,
            )
        }
    }
}

impl Render for PastTransactionList {
    fn pretty(&self, ctx: &RenderContext, meta: &Metadata) -> String {
        let rows = self
            .0
            .iter()
            .map(|trx| {
                vec![
                    Cell::new(format_millis(trx.visible_ts, "%d %b %Y %H:%M"), Style::Title),
                    Cell::plain(trx.third_party()),
                    trx.amount_cell(),
                    Cell::plain(meta.category(&trx.category)),
                    Cell::plain(trx.merchant_city.as_str()),
                    Cell::new(trx.reference_text.as_str(), Style::Faint),
                ]
            })
            .collect::<Vec<_>>();
        render_table(
            ctx,
            &["Date", "Third-party", "Amount", "Category", "Location", "Comment"],
            &rows,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(rename = "mobilePhoneNumber", default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Who a Money Beam goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Email(String),
    Phone(String),
}

impl Recipient {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        if value.contains('@') {
            Ok(Recipient::Email(value.to_string()))
        } else if value.starts_with('+') {
            Ok(Recipient::Phone(value.to_string()))
        } else {
            anyhow::bail!(
                "the recipient must be an email address or a phone number (starting with '+')"
            )
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Recipient::Email(value) | Recipient::Phone(value) => value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBeamDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub amount: f64,
    pub partner_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_text: Option<String>,
}

impl MoneyBeamDetails {
    pub fn new(
        recipient: &Recipient,
        name: Option<String>,
        amount: f64,
        comment: Option<String>,
    ) -> Self {
        let (partner_email, partner_phone) = match recipient {
            Recipient::Email(email) => (Some(email.clone()), None),
            Recipient::Phone(phone) => (None, Some(phone.clone())),
        };
        Self {
            kind: "FT",
            amount,
            partner_name: name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| recipient.as_str().to_string()),
            partner_email,
            partner_phone,
            reference_text: comment.filter(|comment| !comment.is_empty()),
        }
    }
}

// No Debug: the PIN must not reach logs.
#[derive(Serialize)]
pub struct MoneyBeam {
    pub pin: String,
    pub transaction: MoneyBeamDetails,
}
