//! # keyroll-jwt
//!
//! Signed JWT-bearer assertions for the OAuth2
//! `urn:ietf:params:oauth:grant-type:jwt-bearer` grant.
//!
//! This crate provides functionality for:
//! - Loading PEM-encoded RSA private keys from a key-ring entry's location
//! - Building the assertion claims (`iss`, `sub`, `aud`, `exp`)
//! - Signing them with RS256, labelling the header with the entry's `kid`
//!
//! ## Assertion lifetime
//!
//! | Value | Lifetime | Held by |
//! |-------|----------|---------|
//! | **Signed assertion** | 180 seconds | One token exchange, then dropped |
//! | **Access token** | Set by the identity provider | The caller |
//!
//! Assertions are one-shot: they are built immediately before an exchange
//! and never stored or logged. [`SignedAssertion`] redacts itself in `Debug`
//! output and has no serializer.

pub mod assertion;
pub mod claims;
pub mod error;
pub mod keys;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use assertion::{ASSERTION_LIFETIME_SECS, AssertionBuilder, SignedAssertion};
pub use claims::AssertionClaims;
pub use error::SigningError;
pub use keys::SigningKey;
