//! Shared test utilities: fixture RSA keys and assertion decoding.
//!
//! Feature-gated behind `testutil`. Enable it from a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! keyroll-jwt = { path = "../keyroll-jwt", features = ["testutil"] }
//! ```
//!
//! The fixture keys are throwaway 2048-bit keys generated for tests only.

use crate::claims::AssertionClaims;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// PKCS#8 private key labelled `2025` in fixtures.
pub const RSA_2025_PRIVATE_PEM: &str = include_str!("../testdata/rsa-2025.pem");
pub const RSA_2025_PUBLIC_PEM: &str = include_str!("../testdata/rsa-2025.pub.pem");

/// PKCS#1 private key labelled `2030` in fixtures.
pub const RSA_2030_PRIVATE_PEM: &str = include_str!("../testdata/rsa-2030.pem");
pub const RSA_2030_PUBLIC_PEM: &str = include_str!("../testdata/rsa-2030.pub.pem");

/// Write `pem` to `dir/name` and return the full path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_key(dir: &Path, name: &str, pem: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pem).expect("write fixture key");
    path
}

/// A temporary directory holding `key-2025.pem` and `key-2030.pem`.
///
/// # Panics
///
/// Panics if the directory or files cannot be created.
pub fn fixture_key_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create fixture dir");
    write_key(dir.path(), "key-2025.pem", RSA_2025_PRIVATE_PEM);
    write_key(dir.path(), "key-2030.pem", RSA_2030_PRIVATE_PEM);
    dir
}

/// Verify an assertion against a public key and return its claims.
pub fn decode_assertion(
    token: &str,
    public_pem: &str,
    audience: &str,
) -> Result<AssertionClaims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_rsa_pem(public_pem.as_bytes())?;
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[audience]);
    validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);

    jsonwebtoken::decode::<AssertionClaims>(token, &key, &validation).map(|data| data.claims)
}

/// The `kid` header of an assertion, without verifying it.
pub fn assertion_kid(token: &str) -> Option<String> {
    jsonwebtoken::decode_header(token).ok().and_then(|h| h.kid)
}
