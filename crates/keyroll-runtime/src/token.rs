//! Access tokens returned by the identity provider.

use crate::error::ExchangeError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// A bearer access token and the API host it is valid for.
///
/// Contents are relayed from the provider untouched; this crate does not
/// track expiry once the token is handed back.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,

    /// Base URL of the API instance (`instance_url`).
    pub api_host: String,

    /// Provider `issued_at` if sent, else when the response was received.
    pub issued_at_hint: DateTime<Utc>,

    pub token_type: Option<String>,
    pub scope: Option<String>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("api_host", &self.api_host)
            .field("issued_at_hint", &self.issued_at_hint)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    instance_url: Option<String>,
    #[serde(default)]
    issued_at: Option<serde_json::Value>,
    #[serde(default)]
    token_type: Option<serde_json::Value>,
    #[serde(default)]
    scope: Option<serde_json::Value>,
}

impl AccessToken {
    /// Parse a successful token endpoint body.
    pub fn from_response_body(body: &str, received_at: DateTime<Utc>) -> Result<Self, ExchangeError> {
        let response: TokenResponse = serde_json::from_str(body)
            .map_err(|e| ExchangeError::MalformedResponse(format!("invalid JSON: {e}")))?;

        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ExchangeError::MalformedResponse("missing access_token".to_string()))?;
        let api_host = response
            .instance_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ExchangeError::MalformedResponse("missing instance_url".to_string()))?;

        let issued_at_hint = response
            .issued_at
            .as_ref()
            .and_then(parse_issued_at)
            .unwrap_or(received_at);

        Ok(Self {
            token,
            api_host,
            issued_at_hint,
            token_type: optional_text(response.token_type),
            scope: optional_text(response.scope),
        })
    }
}

/// Optional extras are relayed only when sent as strings.
fn optional_text(value: Option<serde_json::Value>) -> Option<String> {
    value.as_ref().and_then(serde_json::Value::as_str).map(str::to_string)
}

/// `issued_at` is epoch milliseconds, sent as a string or a number.
fn parse_issued_at(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    let millis = match value {
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok()?,
        serde_json::Value::Number(n) => n.as_i64()?,
        _ => return None,
    };
    DateTime::from_timestamp_millis(millis)
}
