use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{Settings, token::OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "keyroll",
    version,
    about = "Salesforce JWT-bearer token acquisition that survives certificate rotation"
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Acquire an access token, trying each configured key until one is accepted.
    Token {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Show the key ring in the order it would be tried for the tenant.
    Keys {
        /// Also load each key locally and report whether it parses
        #[arg(long, default_value_t = false)]
        check: bool,
    },

    /// Print the learned key preferences.
    Prefs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.settings.load()?;

    match cli.cmd {
        Command::Token { format } => commands::token::run(commands::resolve(&config)?, format).await?,
        Command::Keys { check } => commands::keys::run(&commands::resolve(&config)?, check)?,
        Command::Prefs => commands::prefs::run(&config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "keyroll",
            "keys",
            "--check",
            "--keys",
            "a:/keys/a.pem",
            "--tenant",
            "acme",
        ])
        .unwrap();

        assert_eq!(cli.settings.keys.as_deref(), Some("a:/keys/a.pem"));
        assert_eq!(cli.settings.tenant.as_deref(), Some("acme"));
        assert!(matches!(cli.cmd, Command::Keys { check: true }));
    }
}
