use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration as ChronoDuration;

use crate::cli_args::{Cli, OutputFormat};
use crate::modules::auth::{CredentialStore, Prompter, TokenManager};
use crate::modules::shared::RenderContext;
use crate::modules::system::ApiClient;
use crate::DEFAULT_API_URL;

/// Runtime configuration resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub credentials_path: PathBuf,
    pub refresh_margin: ChronoDuration,
    pub diagnostics: bool,
    pub format: OutputFormat,
    pub colored: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let api_url = cli
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        ensure_secure_addr(&api_url, cli.insecure)?;

        let credentials_path = match cli.credentials.clone() {
            Some(path) => path,
            None => CredentialStore::default_path()?,
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            credentials_path,
            refresh_margin: ChronoDuration::seconds(i64::from(cli.refresh_margin)),
            diagnostics: is_enabled(cli.debug.as_deref()),
            format: cli.format,
            colored: !cli.no_color && std::io::stdout().is_terminal(),
        })
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.format, self.colored)
    }

    pub fn api_client(&self, http: reqwest::Client, prompter: Arc<dyn Prompter>) -> ApiClient {
        let tokens = TokenManager::new(
            http.clone(),
            &self.api_url,
            CredentialStore::new(&self.credentials_path),
            prompter,
            self.refresh_margin,
        );
        ApiClient::new(http, self.api_url.clone(), tokens, self.diagnostics)
    }
}

pub(crate) fn ensure_secure_addr(addr: &str, allow_insecure: bool) -> anyhow::Result<()> {
    if addr.starts_with("http://") && !allow_insecure {
        anyhow::bail!("refusing to use http:// without --insecure");
    }
    Ok(())
}

/// `DEBUG=0`, `DEBUG=false` and an empty value leave diagnostics off.
fn is_enabled(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(value) => !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["n26"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("parse")
    }

    #[test]
    fn http_api_url_requires_insecure() {
        let cli = parse(&["--api-url", "http://127.0.0.1:1", "--credentials", "x", "info"]);
        let err = Settings::from_cli(&cli).expect_err("insecure");
        assert_eq!(err.to_string(), "refusing to use http:// without --insecure");

        let cli = parse(&[
            "--api-url",
            "http://127.0.0.1:1/",
            "--insecure",
            "--credentials",
            "x",
            "info",
        ]);
        let settings = Settings::from_cli(&cli).expect("settings");
        assert_eq!(settings.api_url, "http://127.0.0.1:1");
    }

    #[test]
    fn refresh_margin_is_configurable() {
        let cli = parse(&["--credentials", "x", "--refresh-margin", "120", "info"]);
        let settings = Settings::from_cli(&cli).expect("settings");
        assert_eq!(settings.refresh_margin, ChronoDuration::seconds(120));
        assert_eq!(settings.credentials_path, PathBuf::from("x"));
    }

    #[test]
    fn debug_values() {
        assert!(!is_enabled(None));
        assert!(!is_enabled(Some("")));
        assert!(!is_enabled(Some("0")));
        assert!(!is_enabled(Some("false")));
        assert!(is_enabled(Some("1")));
        assert!(is_enabled(Some("yes")));
    }
}
