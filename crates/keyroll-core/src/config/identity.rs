//! Identity-provider domain and client identity.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which identity provider the assertion is addressed to.
///
/// The short names `login` and `test` map to the production and sandbox
/// login hosts; anything else is used as a literal host name
/// (e.g. `acme.my.salesforce.com`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdentityDomain {
    #[default]
    Login,
    Test,
    Host(String),
}

impl IdentityDomain {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "login" => Self::Login,
            "test" => Self::Test,
            host => Self::Host(host.to_string()),
        }
    }

    /// The audience claim, which is also the base URL of the token endpoint.
    pub fn audience(&self) -> String {
        match self {
            Self::Login => "https://login.salesforce.com".to_string(),
            Self::Test => "https://test.salesforce.com".to_string(),
            Self::Host(host) => format!("https://{host}"),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Login => "login",
            Self::Test => "test",
            Self::Host(host) => host,
        }
    }
}

impl fmt::Display for IdentityDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for IdentityDomain {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<IdentityDomain> for String {
    fn from(value: IdentityDomain) -> Self {
        value.as_str().to_string()
    }
}

/// The connected-app identity assertions are issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    /// Connected-app consumer key; the JWT `iss`.
    pub client_id: String,

    /// Username the token acts as; the JWT `sub`.
    pub subject: String,

    pub domain: IdentityDomain,
}

impl ClientIdentity {
    /// Validate and build an identity. Blank ids are configuration errors.
    pub fn new(
        client_id: impl Into<String>,
        subject: impl Into<String>,
        domain: IdentityDomain,
    ) -> Result<Self, ConfigError> {
        let client_id = client_id.into().trim().to_string();
        let subject = subject.into().trim().to_string();

        if client_id.is_empty() {
            return Err(ConfigError::MissingClientId);
        }
        if subject.is_empty() {
            return Err(ConfigError::MissingSubject);
        }

        Ok(Self {
            client_id,
            subject,
            domain,
        })
    }

    pub fn audience(&self) -> String {
        self.domain.audience()
    }
}
