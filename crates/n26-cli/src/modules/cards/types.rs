use serde::{Deserialize, Serialize};

use crate::modules::shared::{format_millis, id_to_label, Metadata, Render, RenderContext, Style};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(rename = "usernameOnCard", default)]
    pub holder: String,
    #[serde(default)]
    pub masked_pan: String,
    #[serde(rename = "expirationDate", default)]
    pub expiration: i64,
    #[serde(default)]
    pub card_type: String,
    #[serde(default)]
    pub card_product_type: String,
    #[serde(default)]
    pub design: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardList(pub Vec<Card>);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limit {
    pub limit: String,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitList(pub Vec<Limit>);

impl Card {
    /// Display text and colour for an upstream card status.
    pub fn status_label(&self) -> (String, Style) {
        match self.status.as_str() {
            "M_ACTIVE" => ("ACTIVE".to_string(), Style::Ok),
            "M_LINKED" => ("LINKED".to_string(), Style::Warn),
            "M_DISABLED" => ("BLOCKED".to_string(), Style::Error),
            "M_PHYSICAL_UNCONFIRMED_DISABLED" => ("UNCONFIRMED".to_string(), Style::Error),
            other => (other.to_string(), Style::Plain),
        }
    }

    fn last_digits(&self) -> &str {
        let len = self.masked_pan.len();
        self.masked_pan.get(len.saturating_sub(4)..).unwrap_or(&self.masked_pan)
    }

    fn model(&self) -> String {
        if self.card_product_type == self.design {
            self.card_product_type.clone()
        } else {
            format!("{}/{}", self.card_product_type, self.design)
        }
    }
}

impl Limit {
    pub fn label(&self) -> String {
        match self.limit.as_str() {
            "POS_DAILY_ACCOUNT" => "Payment".to_string(),
            "ATM_DAILY_ACCOUNT" => "Withdrawal".to_string(),
            other => id_to_label(other),
        }
    }
}

impl Render for CardList {
    fn pretty(&self, ctx: &RenderContext, _meta: &Metadata) -> String {
        let mut out = String::new();
        for card in &self.0 {
            let (status, style) = card.status_label();
            ctx.title(&mut out, &format!("*-{}", card.last_digits()));
            ctx.attr(&mut out, "ID", &ctx.paint(&card.id, Style::Faint));
            ctx.attr(&mut out, "Holder", &card.holder);
            ctx.attr(
                &mut out,
                "Expires on",
                &format_millis(card.expiration, "%b %Y"),
            );
            ctx.attr(&mut out, "Type", &card.card_type);
            ctx.attr(&mut out, "Model", &card.model());
            ctx.attr(&mut out, "Status", &ctx.paint(&status, style));
            out.push('\n');
        }
        out
    }
}

impl Render for LimitList {
    fn pretty(&self, ctx: &RenderContext, _meta: &Metadata) -> String {
        let mut out = String::new();
        ctx.title(&mut out, "Card limits");
        for limit in &self.0 {
            ctx.attr(&mut out, &limit.label(), &format!("{:.2}", limit.amount));
        }
        out
    }
}
