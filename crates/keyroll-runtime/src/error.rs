//! Error types for token acquisition.

use keyroll_core::{ConfigError, TenantId};
use keyroll_jwt::SigningError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of one token exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// DNS, TLS, connection or timeout failure before a response arrived.
    #[error("transport error: {cause}")]
    Transport { cause: String },

    /// The token endpoint answered with a non-success status.
    #[error("token endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// A success status whose body lacks the expected fields.
    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

impl ExchangeError {
    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        let mut cause = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(inner) = source {
            cause.push_str(": ");
            cause.push_str(&inner.to_string());
            source = inner.source();
        }
        Self::Transport { cause }
    }
}

/// Why a single candidate key did not produce a token.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// Errors returned to the caller of an acquisition.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Every candidate failed. Only the most recent failure is kept.
    #[error("JWT exchange failed for tenant='{tenant}'. Last error: {last}")]
    Exhausted { tenant: TenantId, last: AttemptError },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// A learned preference could not be written.
///
/// Never fatal: the token has already been obtained, only the next call's
/// ordering hint is lost.
#[derive(Debug, Error)]
#[error("could not persist key preferences to {}: {reason}", path.display())]
pub struct PersistenceWarning {
    pub path: PathBuf,
    pub reason: String,
}
