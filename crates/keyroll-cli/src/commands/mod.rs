//! CLI command implementations for keyroll.

pub mod keys;
pub mod prefs;
pub mod token;

use anyhow::Context;
use clap::Args;
use keyroll_core::{KeyrollConfig, ResolvedConfig};
use std::path::PathBuf;

/// Settings shared by every command. Flags and environment variables take
/// precedence over the YAML file given with `--config`.
#[derive(Args, Debug, Default)]
pub struct Settings {
    /// YAML configuration file
    #[arg(long, env = "KEYROLL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Connected app consumer key (assertion issuer)
    #[arg(long, env = "SF_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// User the token is issued for (assertion subject)
    #[arg(long, env = "SF_JWT_USERNAME", global = true)]
    pub username: Option<String>,

    /// "login", "test", or a custom host such as acme.my.salesforce.com
    #[arg(long, env = "SF_DOMAIN", global = true)]
    pub domain: Option<String>,

    /// Key ring as "id:path,id:path"
    #[arg(long, env = "SF_KEYS", global = true)]
    pub keys: Option<String>,

    /// Single key used when no key ring is given
    #[arg(long, env = "SF_PRIVATE_KEY_PATH", global = true)]
    pub private_key_path: Option<String>,

    /// Tenant the learned key is recorded under
    #[arg(long, env = "TENANT_ID", global = true)]
    pub tenant: Option<String>,

    /// Where learned key preferences are stored
    #[arg(long, env = "KEYMAP_PATH", global = true)]
    pub keymap_path: Option<String>,
}

impl Settings {
    /// Read the config file, if any, and overlay flag and environment values.
    pub fn load(&self) -> anyhow::Result<KeyrollConfig> {
        let base = match &self.config {
            Some(path) => KeyrollConfig::from_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => KeyrollConfig::default(),
        };
        tracing::debug!(config_file = ?self.config, "loaded configuration");

        Ok(base.merge(self.overrides()))
    }

    fn overrides(&self) -> KeyrollConfig {
        KeyrollConfig {
            client_id: self.client_id.clone(),
            username: self.username.clone(),
            domain: self.domain.clone(),
            keys: self.keys.clone(),
            private_key_path: self.private_key_path.clone(),
            tenant: self.tenant.clone(),
            keymap_path: self.keymap_path.clone(),
        }
    }
}

/// Validate the merged configuration before anything touches the network.
pub fn resolve(config: &KeyrollConfig) -> anyhow::Result<ResolvedConfig> {
    config.resolve().context("Invalid configuration")
}
