//! Assertion building and signing.

use crate::claims::AssertionClaims;
use crate::error::SigningError;
use crate::keys::SigningKey;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, Header};
use keyroll_core::{ClientIdentity, KeyEntry};
use std::fmt;

/// Seconds an assertion stays valid. It is consumed by a single exchange.
pub const ASSERTION_LIFETIME_SECS: i64 = 180;

/// A signed, compact-serialized JWT ready for one token exchange.
pub struct SignedAssertion {
    token: String,
    key_id: String,
}

impl SignedAssertion {
    /// The compact JWT, for the `assertion` form field.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Id of the key-ring entry that signed this assertion.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

impl fmt::Debug for SignedAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedAssertion")
            .field("key_id", &self.key_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Builds RS256 assertions for one issuer/subject/audience triple.
#[derive(Debug, Clone)]
pub struct AssertionBuilder {
    issuer: String,
    subject: String,
    audience: String,
    lifetime: Duration,
}

impl AssertionBuilder {
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            subject: subject.into(),
            audience: audience.into(),
            lifetime: Duration::seconds(ASSERTION_LIFETIME_SECS),
        }
    }

    /// Builder for a client identity; the audience comes from its domain.
    pub fn for_identity(identity: &ClientIdentity) -> Self {
        Self::new(&identity.client_id, &identity.subject, identity.audience())
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn claims(&self, now: DateTime<Utc>) -> AssertionClaims {
        AssertionClaims::new(&self.issuer, &self.subject, &self.audience, now, self.lifetime)
    }

    /// Sign with an already-loaded key, labelling the header with `key_id`.
    pub fn sign_with(
        &self,
        key: &SigningKey,
        key_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedAssertion, SigningError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(key_id.to_string());

        let token = jsonwebtoken::encode(&header, &self.claims(now), key.encoding_key())
            .map_err(|e| SigningError::Encoding(e.to_string()))?;

        Ok(SignedAssertion {
            token,
            key_id: key_id.to_string(),
        })
    }

    /// Read the entry's key material and sign an assertion with it.
    pub fn sign(&self, entry: &KeyEntry, now: DateTime<Utc>) -> Result<SignedAssertion, SigningError> {
        let key = SigningKey::load(entry)?;
        self.sign_with(&key, &entry.id, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use keyroll_core::IdentityDomain;

    fn builder() -> AssertionBuilder {
        let identity =
            ClientIdentity::new("3MVG9client", "bot@example.com", IdentityDomain::Login).unwrap();
        AssertionBuilder::for_identity(&identity)
    }

    #[test]
    fn test_sign_and_verify() {
        let dir = testutil::fixture_key_dir();
        let entry = KeyEntry::new("2025", dir.path().join("key-2025.pem").to_string_lossy());

        let now = Utc::now();
        let assertion = builder().sign(&entry, now).unwrap();
        assert_eq!(assertion.key_id(), "2025");
        assert_eq!(testutil::assertion_kid(assertion.as_str()).as_deref(), Some("2025"));

        let claims = testutil::decode_assertion(
            assertion.as_str(),
            testutil::RSA_2025_PUBLIC_PEM,
            "https://login.salesforce.com",
        )
        .unwrap();
        assert_eq!(claims.iss, "3MVG9client");
        assert_eq!(claims.sub, "bot@example.com");
        assert_eq!(claims.aud, "https://login.salesforce.com");
        assert_eq!(claims.exp, now.timestamp() + ASSERTION_LIFETIME_SECS);
    }

    #[test]
    fn test_signature_does_not_verify_with_other_key() {
        let dir = testutil::fixture_key_dir();
        let entry = KeyEntry::new("2030", dir.path().join("key-2030.pem").to_string_lossy());
        let assertion = builder().sign(&entry, Utc::now()).unwrap();

        assert!(
            testutil::decode_assertion(
                assertion.as_str(),
                testutil::RSA_2025_PUBLIC_PEM,
                "https://login.salesforce.com",
            )
            .is_err()
        );
        assert!(
            testutil::decode_assertion(
                assertion.as_str(),
                testutil::RSA_2030_PUBLIC_PEM,
                "https://login.salesforce.com",
            )
            .is_ok()
        );
    }

    #[test]
    fn test_missing_key_is_signing_error() {
        let entry = KeyEntry::new("gone", "/nonexistent/keyroll/gone.pem");
        let err = builder().sign(&entry, Utc::now()).unwrap_err();
        assert!(matches!(err, SigningError::KeyUnreadable { .. }));
    }

    #[test]
    fn test_debug_redacts_token() {
        let key = SigningKey::from_pem(testutil::RSA_2025_PRIVATE_PEM.as_bytes(), "mem").unwrap();
        let assertion = builder().sign_with(&key, "2025", Utc::now()).unwrap();
        let debug = format!("{assertion:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(assertion.as_str()));
    }
}
