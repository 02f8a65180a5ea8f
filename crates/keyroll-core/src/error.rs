//! Error types for configuration loading.

use thiserror::Error;

/// Fatal configuration problems, reported before any network access.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The client identifier (JWT issuer) is missing or blank.
    #[error("missing client id: set SF_CLIENT_ID or pass --client-id")]
    MissingClientId,

    /// The acting subject (JWT subject) is missing or blank.
    #[error("missing JWT subject: set SF_JWT_USERNAME or pass --username")]
    MissingSubject,

    /// No usable `id:location` entries and no fallback key location.
    #[error("no keys found: set SF_KEYS (key_id:path,...) or SF_PRIVATE_KEY_PATH")]
    EmptyKeyRing,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
