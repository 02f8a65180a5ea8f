//! Assertion claims.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims of a JWT-bearer assertion. Exactly these four are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Client id of the connected app.
    pub iss: String,

    /// Username the access token will act as.
    pub sub: String,

    /// Identity-provider login URL.
    pub aud: String,

    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        audience: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            iss: issuer.into(),
            sub: subject.into(),
            aud: audience.into(),
            exp: (now + lifetime).timestamp(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_relative_to_now() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = AssertionClaims::new("iss", "sub", "aud", now, Duration::seconds(180));
        assert_eq!(claims.exp, 1_700_000_180);
        assert_eq!(claims.expires_at(), Some(now + Duration::seconds(180)));
    }

    #[test]
    fn test_serializes_only_registered_claims() {
        let now = DateTime::from_timestamp(0, 0).unwrap();
        let claims = AssertionClaims::new("iss", "sub", "aud", now, Duration::seconds(1));
        let value = serde_json::to_value(&claims).unwrap();
        let mut keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, ["aud", "exp", "iss", "sub"]);
    }
}
