use keyroll_core::TenantId;

/// Result of trying one candidate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    /// Key material could not be read or used; no request was sent.
    SigningFailed(String),
    /// The exchange was attempted and failed.
    ExchangeFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptEvent {
    pub tenant: TenantId,
    pub key_id: String,
    /// Zero-based position in the attempt order.
    pub position: usize,
    pub outcome: AttemptOutcome,
}

/// Receives one event per candidate tried. Never sees assertions or tokens.
pub trait AttemptSink: Send + Sync {
    fn record(&self, event: AttemptEvent);
}

/// Logs attempts through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAttemptSink;

impl AttemptSink for TracingAttemptSink {
    fn record(&self, event: AttemptEvent) {
        match &event.outcome {
            AttemptOutcome::Succeeded => tracing::info!(
                tenant = %event.tenant,
                kid = %event.key_id,
                position = event.position,
                "token exchange succeeded"
            ),
            AttemptOutcome::SigningFailed(error) => tracing::warn!(
                tenant = %event.tenant,
                kid = %event.key_id,
                position = event.position,
                %error,
                "could not sign assertion, trying next key"
            ),
            AttemptOutcome::ExchangeFailed(error) => tracing::warn!(
                tenant = %event.tenant,
                kid = %event.key_id,
                position = event.position,
                %error,
                "token exchange failed, trying next key"
            ),
        }
    }
}
