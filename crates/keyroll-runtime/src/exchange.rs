use crate::error::ExchangeError;
use crate::token::AccessToken;
use async_trait::async_trait;
use chrono::Utc;
use keyroll_jwt::SignedAssertion;
use std::time::Duration;

/// OAuth2 grant type for exchanging a signed JWT.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Per-request bound on a token exchange.
pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Token endpoint for an audience, e.g. `https://login.salesforce.com/services/oauth2/token`.
pub fn token_endpoint(audience: &str) -> String {
    format!("{}/services/oauth2/token", audience.trim_end_matches('/'))
}

/// Exchanges a signed assertion for an access token.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Send one assertion to the token endpoint of `audience`.
    async fn exchange(
        &self,
        audience: &str,
        assertion: &SignedAssertion,
    ) -> Result<AccessToken, ExchangeError>;
}

/// reqwest-backed exchanger.
#[derive(Debug, Clone)]
pub struct HttpTokenExchanger {
    client: reqwest::Client,
}

impl HttpTokenExchanger {
    /// Exchanger with the standard 30-second timeout.
    pub fn new() -> Result<Self, ExchangeError> {
        Self::with_timeout(EXCHANGE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ExchangeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExchangeError::transport(&e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TokenExchanger for HttpTokenExchanger {
    async fn exchange(
        &self,
        audience: &str,
        assertion: &SignedAssertion,
    ) -> Result<AccessToken, ExchangeError> {
        let url = token_endpoint(audience);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ExchangeError::transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::transport(&e))?;

        if !status.is_success() {
            return Err(ExchangeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        AccessToken::from_response_body(&body, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_endpoint() {
        assert_eq!(
            token_endpoint("https://login.salesforce.com"),
            "https://login.salesforce.com/services/oauth2/token"
        );
        assert_eq!(
            token_endpoint("https://acme.my.salesforce.com/"),
            "https://acme.my.salesforce.com/services/oauth2/token"
        );
    }
}
