//! Configuration types for keyroll.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. command-line flags
//! 2. environment variables (`SF_CLIENT_ID`, `SF_JWT_USERNAME`, `SF_DOMAIN`,
//!    `SF_KEYS`, `SF_PRIVATE_KEY_PATH`, `TENANT_ID`, `KEYMAP_PATH`)
//! 3. an optional YAML file
//!
//! The CLI folds flags and environment into one [`KeyrollConfig`] and
//! [`KeyrollConfig::merge`]s it over the file. [`KeyrollConfig::resolve`]
//! then validates everything before any key is read or request is sent.

pub mod identity;
pub mod keyring;

use crate::error::ConfigError;
use crate::tenant::TenantId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use identity::{ClientIdentity, IdentityDomain};
pub use keyring::{KeyEntry, KeyRing};

/// Default location of the learned-preference snapshot.
pub const DEFAULT_KEYMAP_PATH: &str = "~/.keyroll_keymap.json";

/// Raw, unvalidated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyrollConfig {
    /// Connected-app client id (JWT issuer).
    #[serde(default)]
    pub client_id: Option<String>,

    /// Username to act as (JWT subject).
    #[serde(default)]
    pub username: Option<String>,

    /// `login`, `test`, or a literal host such as `acme.my.salesforce.com`.
    #[serde(default)]
    pub domain: Option<String>,

    /// Key ring as `id:path,id:path,...`.
    #[serde(default)]
    pub keys: Option<String>,

    /// Single key used when `keys` is not set.
    #[serde(default)]
    pub private_key_path: Option<String>,

    #[serde(default)]
    pub tenant: Option<String>,

    /// Where learned key preferences are persisted.
    #[serde(default)]
    pub keymap_path: Option<String>,
}

/// Validated configuration ready to drive an acquisition.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub identity: ClientIdentity,
    pub keyring: KeyRing,
    pub tenant: TenantId,
    pub preference_path: PathBuf,
}

impl KeyrollConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Overlay `overrides` on top of `self`; every value set in `overrides` wins.
    pub fn merge(self, overrides: KeyrollConfig) -> Self {
        Self {
            client_id: overrides.client_id.or(self.client_id),
            username: overrides.username.or(self.username),
            domain: overrides.domain.or(self.domain),
            keys: overrides.keys.or(self.keys),
            private_key_path: overrides.private_key_path.or(self.private_key_path),
            tenant: overrides.tenant.or(self.tenant),
            keymap_path: overrides.keymap_path.or(self.keymap_path),
        }
    }

    /// Snapshot location: `keymap_path` trimmed, or the default when unset or blank.
    pub fn preference_path(&self) -> PathBuf {
        let path = self
            .keymap_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_KEYMAP_PATH);
        expand_home(path)
    }

    /// Validate identity and key ring, apply defaults.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let domain = self
            .domain
            .as_deref()
            .map(IdentityDomain::parse)
            .unwrap_or_default();

        let identity = ClientIdentity::new(
            self.client_id.clone().unwrap_or_default(),
            self.username.clone().unwrap_or_default(),
            domain,
        )?;

        let keyring = KeyRing::from_sources(self.keys.as_deref(), self.private_key_path.as_deref())?;

        let tenant = self
            .tenant
            .as_deref()
            .map(TenantId::new)
            .unwrap_or_default();

        let preference_path = self.preference_path();

        tracing::debug!(
            domain = %identity.domain,
            keys = keyring.len(),
            tenant = %tenant,
            keymap = %preference_path.display(),
            "resolved configuration"
        );

        Ok(ResolvedConfig {
            identity,
            keyring,
            tenant,
            preference_path,
        })
    }
}

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) else {
        return PathBuf::from(path);
    };

    if path == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = path.strip_prefix("~/") {
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn base() -> KeyrollConfig {
        KeyrollConfig {
            client_id: Some("3MVG9client".to_string()),
            username: Some("integration@example.com".to_string()),
            keys: Some("2025:/keys/a.pem,2030:/keys/b.pem".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let resolved = base().resolve().unwrap();
        assert_eq!(resolved.identity.domain, IdentityDomain::Login);
        assert_eq!(resolved.tenant.as_str(), "default");
        assert_eq!(resolved.keyring.len(), 2);
        assert!(resolved.preference_path.ends_with(".keyroll_keymap.json"));
    }

    #[test]
    fn test_resolve_reports_missing_identity_before_keys() {
        let config = KeyrollConfig {
            keys: None,
            client_id: None,
            ..base()
        };
        assert!(matches!(config.resolve(), Err(ConfigError::MissingClientId)));

        let config = KeyrollConfig {
            username: Some("  ".to_string()),
            ..base()
        };
        assert!(matches!(config.resolve(), Err(ConfigError::MissingSubject)));
    }

    #[test]
    fn test_resolve_empty_ring() {
        let config = KeyrollConfig {
            keys: Some("not-a-pair".to_string()),
            ..base()
        };
        assert!(matches!(config.resolve(), Err(ConfigError::EmptyKeyRing)));

        let config = KeyrollConfig {
            keys: None,
            private_key_path: None,
            ..base()
        };
        assert!(matches!(config.resolve(), Err(ConfigError::EmptyKeyRing)));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = KeyrollConfig {
            domain: Some("test".to_string()),
            tenant: Some("from-file".to_string()),
            ..base()
        };
        let overrides = KeyrollConfig {
            tenant: Some("acme".to_string()),
            ..Default::default()
        };

        let merged = file.merge(overrides);
        assert_eq!(merged.tenant.as_deref(), Some("acme"));
        assert_eq!(merged.domain.as_deref(), Some("test"));
        assert_eq!(merged.client_id.as_deref(), Some("3MVG9client"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "client_id: abc\nusername: bot@example.com\ndomain: acme.my.salesforce.com\nprivate_key_path: /keys/server.pem\ntenant: acme\nkeymap_path: /var/lib/keyroll/keymap.json"
        )
        .unwrap();

        let resolved = KeyrollConfig::from_file(file.path()).unwrap().resolve().unwrap();
        assert_eq!(resolved.identity.audience(), "https://acme.my.salesforce.com");
        assert_eq!(resolved.keyring.entries()[0].id, "default");
        assert_eq!(resolved.tenant.as_str(), "acme");
        assert_eq!(resolved.preference_path, PathBuf::from("/var/lib/keyroll/keymap.json"));
    }

    #[test]
    fn test_preference_path_trims_and_defaults() {
        let padded = KeyrollConfig {
            keymap_path: Some("  /var/lib/keyroll/keymap.json \t".to_string()),
            ..base()
        };
        assert_eq!(padded.preference_path(), PathBuf::from("/var/lib/keyroll/keymap.json"));
        assert_eq!(padded.resolve().unwrap().preference_path, padded.preference_path());

        let blank = KeyrollConfig {
            keymap_path: Some("   ".to_string()),
            ..base()
        };
        assert_eq!(blank.preference_path(), expand_home(DEFAULT_KEYMAP_PATH));
        assert_eq!(KeyrollConfig::default().preference_path(), expand_home(DEFAULT_KEYMAP_PATH));
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        assert!(matches!(
            KeyrollConfig::from_yaml("client_id: [unterminated"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/etc/keys/a.pem"), PathBuf::from("/etc/keys/a.pem"));
        assert_eq!(expand_home("relative/a.pem"), PathBuf::from("relative/a.pem"));
        assert!(!expand_home("~/a.pem").to_string_lossy().starts_with('~') || std::env::var_os("HOME").is_none());
    }
}
