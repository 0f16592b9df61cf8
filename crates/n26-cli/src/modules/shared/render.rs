use colored::Colorize;
use serde::Serialize;

use crate::cli_args::OutputFormat;
use crate::modules::shared::Metadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Title,
    Faint,
    Ok,
    Warn,
    Error,
}

/// Presentation settings handed to every printer.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    format: OutputFormat,
    colored: bool,
}

/// A decoded value that knows how to print itself for humans.
/// JSON output uses the value's `Serialize` impl.
pub trait Render: Serialize {
    fn pretty(&self, ctx: &RenderContext, meta: &Metadata) -> String;
}

impl RenderContext {
    pub fn new(format: OutputFormat, colored: bool) -> Self {
        Self { format, colored }
    }

    pub fn paint(&self, text: &str, style: Style) -> String {
        if !self.colored {
            return text.to_string();
        }
        match style {
            Style::Plain => text.to_string(),
            Style::Title => text.bold().blue().to_string(),
            Style::Faint => text.dimmed().to_string(),
            Style::Ok => text.green().to_string(),
            Style::Warn => text.yellow().to_string(),
            Style::Error => text.red().to_string(),
        }
    }

    pub fn title(&self, out: &mut String, title: &str) {
        out.push_str(&self.paint(&format!("{title}:"), Style::Title));
        out.push('\n');
    }

    pub fn attr(&self, out: &mut String, key: &str, value: &str) {
        out.push_str(&format!(
            "  {} {}\n",
            self.paint(&format!("{key}:"), Style::Faint),
            value
        ));
    }

    pub fn render<T: Render>(&self, value: &T, meta: &Metadata) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Pretty => Ok(value.pretty(self, meta)),
            OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
        }
    }

    pub fn emit<T: Render>(&self, value: &T, meta: &Metadata) -> anyhow::Result<()> {
        print!("{}", self.render(value, meta)?);
        Ok(())
    }

    /// Outcome of a write operation, in either output format.
    pub fn message(&self, text: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Pretty => println!("{}", self.paint(text, Style::Ok)),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "message": text }))?
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
    }

    impl Render for Sample {
        fn pretty(&self, ctx: &RenderContext, _meta: &Metadata) -> String {
            let mut out = String::new();
            ctx.title(&mut out, "Sample");
            ctx.attr(&mut out, "Name", self.name);
            out
        }
    }

    #[test]
    fn plain_context_does_not_emit_escape_codes() {
        let ctx = RenderContext::new(OutputFormat::Pretty, false);
        let out = ctx
            .render(&Sample { name: "x" }, &Metadata::default())
            .expect("render");
        assert_eq!(out, "Sample:\n  Name: x\n");
    }

    #[test]
    fn json_context_serializes_value() {
        let ctx = RenderContext::new(OutputFormat::Json, true);
        let out = ctx
            .render(&Sample { name: "x" }, &Metadata::default())
            .expect("render");
        assert_eq!(out, "{\n  \"name\": \"x\"\n}\n");
    }
}
