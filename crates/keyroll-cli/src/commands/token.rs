//! `keyroll token` - acquire an access token.

use anyhow::Context;
use clap::ValueEnum;
use keyroll_core::ResolvedConfig;
use keyroll_runtime::{AccessToken, FilePreferenceStore, HttpTokenExchanger, Orchestrator, TracingAttemptSink};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{access_token, instance_url, issued_at}`
    Json,
    /// Shell `export` lines
    Env,
}

pub async fn run(config: ResolvedConfig, format: OutputFormat) -> anyhow::Result<()> {
    let exchanger = HttpTokenExchanger::new().context("Failed to build HTTP client")?;
    let store = FilePreferenceStore::new(config.preference_path);
    let orchestrator = Orchestrator::new(&config.identity, config.keyring, exchanger, store, TracingAttemptSink);

    let token = orchestrator.acquire(&config.tenant).await?;

    println!("{}", render(&token, format)?);
    Ok(())
}

pub fn render(token: &AccessToken, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let body = json!({
                "access_token": token.token,
                "instance_url": token.api_host,
                "issued_at": token.issued_at_hint.to_rfc3339(),
            });
            Ok(serde_json::to_string_pretty(&body)?)
        }
        OutputFormat::Env => Ok(format!(
            "export SF_ACCESS_TOKEN={}\nexport SF_INSTANCE_URL={}",
            shell_quote(&token.token),
            shell_quote(&token.api_host)
        )),
    }
}

/// Single-quote for POSIX shells. Salesforce tokens contain `!`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
