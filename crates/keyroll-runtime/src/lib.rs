//! # keyroll-runtime
//!
//! Rotation-tolerant OAuth2 JWT-bearer token acquisition.
//!
//! During a certificate rotation window both the old and the new key may or
//! may not be trusted by the identity provider yet. The [`Orchestrator`]
//! tries each configured key in order until one exchange succeeds, and
//! remembers per tenant which key worked so later calls skip dead keys.
//!
//! ## Failure handling
//!
//! | Failure | Scope | Effect |
//! |---------|-------|--------|
//! | `SigningError` | one candidate | next key is tried, no request sent |
//! | `ExchangeError` | one candidate | next key is tried |
//! | `PersistenceWarning` | learned preference | logged, token still returned |
//! | `AcquisitionError::Exhausted` | whole call | returned with the last failure |
//!
//! ## Example
//!
//! ```rust,no_run
//! use keyroll_core::{ClientIdentity, IdentityDomain, KeyRing, TenantId};
//! use keyroll_runtime::{FilePreferenceStore, HttpTokenExchanger, Orchestrator, TracingAttemptSink};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = ClientIdentity::new("3MVG9...", "integration@example.com", IdentityDomain::Login)?;
//! let keyring = KeyRing::parse("2025:/keys/key-2025.pem,2030:/keys/key-2030.pem")?;
//!
//! let orchestrator = Orchestrator::new(
//!     &identity,
//!     keyring,
//!     HttpTokenExchanger::new()?,
//!     FilePreferenceStore::new("/var/lib/keyroll/keymap.json"),
//!     TracingAttemptSink,
//! );
//!
//! let token = orchestrator.acquire(&TenantId::new("acme")).await?;
//! println!("{}", token.api_host);
//! # Ok(())
//! # }
//! ```

pub mod attempt;
pub mod error;
pub mod exchange;
pub mod orchestrator;
pub mod preference;
pub mod token;

pub use attempt::{AttemptEvent, AttemptOutcome, AttemptSink, TracingAttemptSink};
pub use error::{AcquisitionError, AttemptError, ExchangeError, PersistenceWarning};
pub use exchange::{EXCHANGE_TIMEOUT, HttpTokenExchanger, JWT_BEARER_GRANT_TYPE, TokenExchanger, token_endpoint};
pub use orchestrator::Orchestrator;
pub use preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceRecord, PreferenceStore};
pub use token::AccessToken;
