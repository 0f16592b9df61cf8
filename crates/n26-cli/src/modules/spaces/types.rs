use serde::{Deserialize, Serialize};

use crate::modules::shared::{currency, Metadata, Render, RenderContext, Style};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spaces {
    #[serde(rename = "totalBalance", default)]
    pub total_balance: f64,
    #[serde(default)]
    pub spaces: Vec<Space>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
    #[serde(rename = "isPrimary", default)]
    pub primary: bool,
    pub balance: SpaceBalance,
    #[serde(default)]
    pub goal: Option<SpaceGoal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceBalance {
    pub available_balance: f64,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceGoal {
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceTransfer {
    pub amount: f64,
    pub from_space_id: String,
    pub to_space_id: String,
}

impl Spaces {
    /// Looks a space up by ID first, then by name.
    pub fn find(&self, key: &str) -> Option<&Space> {
        self.spaces
            .iter()
            .find(|space| space.id == key)
            .or_else(|| self.spaces.iter().find(|space| space.name == key))
    }
}

impl Space {
    fn goal_amount(&self) -> Option<f64> {
        self.goal
            .as_ref()
            .map(|goal| goal.amount)
            .filter(|amount| *amount > 0.0)
    }
}

impl Render for Spaces {
    fn pretty(&self, ctx: &RenderContext, _meta: &Metadata) -> String {
        let mut out = String::new();
        for space in &self.spaces {
            if space.primary {
                ctx.title(&mut out, &format!("{} (PRIMARY)", space.name));
            } else {
                ctx.title(&mut out, &space.name);
            }
            ctx.attr(&mut out, "ID", &ctx.paint(&space.id, Style::Faint));
            ctx.attr(
                &mut out,
                "Amount",
                &currency(space.balance.available_balance, &space.balance.currency),
            );
            if let Some(goal) = space.goal_amount() {
                let progress = space.balance.available_balance / goal * 100.0;
                ctx.attr(&mut out, "Goal", &currency(goal, &space.balance.currency));
                ctx.attr(&mut out, "Progress", &format!("{progress:.1} %"));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_args::OutputFormat;

    const SPACES: &str = r#"{
        "totalBalance": 150.0,
        "spaces": [
            {"id": "s-main", "name": "Main", "isPrimary": true,
             "balance": {"availableBalance": 100.0, "currency": "EUR"}},
            {"id": "s-trip", "name": "Trip", "isPrimary": false,
             "balance": {"availableBalance": 50.0, "currency": "EUR"},
             "goal": {"amount": 200.0}}
        ]
    }"#;

    #[test]
    fn spaces_are_found_by_id_or_name() {
        let spaces: Spaces = serde_json::from_str(SPACES).expect("spaces");

        assert_eq!(spaces.find("s-trip").map(|s| s.name.as_str()), Some("Trip"));
        assert_eq!(spaces.find("Main").map(|s| s.id.as_str()), Some("s-main"));
        assert!(spaces.find("Savings").is_none());
    }

    #[test]
    fn goal_progress_is_shown_only_for_goals() {
        let spaces: Spaces = serde_json::from_str(SPACES).expect("spaces");
        let ctx = RenderContext::new(OutputFormat::Pretty, false);

        let out = spaces.pretty(&ctx, &Metadata::default());

        assert!(out.starts_with("Main (PRIMARY):\n  ID: s-main\n  Amount: 100.00 EUR\n\n"));
        assert!(out.contains("  Goal: 200.00 EUR\n  Progress: 25.0 %\n"));
    }

    #[test]
    fn transfer_payload_uses_upstream_names() {
        let payload = SpaceTransfer {
            amount: 12.5,
            from_space_id: "a".to_string(),
            to_space_id: "b".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&payload).expect("json"),
            serde_json::json!({"amount": 12.5, "fromSpaceId": "a", "toSpaceId": "b"})
        );
    }
}
