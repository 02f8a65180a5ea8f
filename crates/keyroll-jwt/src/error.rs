//! Error types for assertion signing.

use std::path::PathBuf;
use thiserror::Error;

/// Failures building an assertion for one candidate key.
///
/// These never abort an acquisition on their own; the next key is tried.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The key file could not be read.
    #[error("failed to read private key {}: {source}", path.display())]
    KeyUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key file was read but is not a usable RSA private key.
    #[error("invalid RSA private key {}: {reason}", path.display())]
    InvalidKey { path: PathBuf, reason: String },

    /// Encoding or signing the JWT failed.
    #[error("failed to sign assertion: {0}")]
    Encoding(String),
}
