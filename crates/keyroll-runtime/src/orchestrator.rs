use crate::attempt::{AttemptEvent, AttemptOutcome, AttemptSink};
use crate::error::{AcquisitionError, AttemptError};
use crate::exchange::TokenExchanger;
use crate::preference::{PreferenceRecord, PreferenceStore};
use crate::token::AccessToken;
use chrono::Utc;
use keyroll_core::{ClientIdentity, ConfigError, KeyEntry, KeyRing, TenantId};
use keyroll_jwt::AssertionBuilder;

/// Acquires access tokens by trying each key of a ring in turn.
///
/// Per call: load the learned preference for the tenant, move that key to
/// the front, then sign and exchange one candidate at a time. The first
/// success is remembered for the tenant and returned. If every candidate
/// fails, only the last failure is reported.
pub struct Orchestrator<E: TokenExchanger, P: PreferenceStore, S: AttemptSink> {
    keyring: KeyRing,
    assertions: AssertionBuilder,
    exchanger: E,
    store: P,
    sink: S,
}

impl<E: TokenExchanger, P: PreferenceStore, S: AttemptSink> Orchestrator<E, P, S> {
    pub fn new(identity: &ClientIdentity, keyring: KeyRing, exchanger: E, store: P, sink: S) -> Self {
        Self {
            keyring,
            assertions: AssertionBuilder::for_identity(identity),
            exchanger,
            store,
            sink,
        }
    }

    /// Candidates in the order they would be tried for `tenant`.
    pub fn attempt_order<'a>(&'a self, record: &PreferenceRecord, tenant: &TenantId) -> Vec<&'a KeyEntry> {
        let hint = record.get(tenant);
        if let Some(hint) = hint {
            if !self.keyring.contains(hint) {
                tracing::debug!(%tenant, kid = hint, "learned key is no longer in the key ring");
            }
        }
        self.keyring.ordered(hint)
    }

    /// Obtain an access token for `tenant`.
    pub async fn acquire(&self, tenant: &TenantId) -> Result<AccessToken, AcquisitionError> {
        let record = self.store.load();
        let order = self.attempt_order(&record, tenant);
        let audience = self.assertions.audience();

        tracing::debug!(
            %tenant,
            audience,
            candidates = order.len(),
            learned = record.get(tenant).unwrap_or("-"),
            "acquiring access token"
        );

        let mut last_error = None;

        for (position, entry) in order.into_iter().enumerate() {
            match self.attempt(entry, audience).await {
                Ok(token) => {
                    self.report(tenant, entry, position, AttemptOutcome::Succeeded);
                    self.remember(record, tenant, entry);
                    return Ok(token);
                }
                Err(err) => {
                    let outcome = match &err {
                        AttemptError::Signing(e) => AttemptOutcome::SigningFailed(e.to_string()),
                        AttemptError::Exchange(e) => AttemptOutcome::ExchangeFailed(e.to_string()),
                    };
                    self.report(tenant, entry, position, outcome);
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(last) => Err(AcquisitionError::Exhausted {
                tenant: tenant.clone(),
                last,
            }),
            None => Err(ConfigError::EmptyKeyRing.into()),
        }
    }

    async fn attempt(&self, entry: &KeyEntry, audience: &str) -> Result<AccessToken, AttemptError> {
        let assertion = self.assertions.sign(entry, Utc::now())?;
        let token = self.exchanger.exchange(audience, &assertion).await?;
        Ok(token)
    }

    fn report(&self, tenant: &TenantId, entry: &KeyEntry, position: usize, outcome: AttemptOutcome) {
        self.sink.record(AttemptEvent {
            tenant: tenant.clone(),
            key_id: entry.id.clone(),
            position,
            outcome,
        });
    }

    fn remember(&self, mut record: PreferenceRecord, tenant: &TenantId, entry: &KeyEntry) {
        let previous = record.insert(tenant, &entry.id);
        if previous.as_deref() != Some(entry.id.as_str()) {
            tracing::info!(%tenant, kid = %entry.id, previous = previous.as_deref().unwrap_or("-"), "learned working key");
        }

        if let Err(warning) = self.store.save(&record) {
            tracing::warn!(%warning, "key preference not saved; next call may try stale keys first");
        }
    }
}
