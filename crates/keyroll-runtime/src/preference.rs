//! Learned key preferences.
//!
//! After a successful exchange the orchestrator remembers which key worked
//! for the tenant, so the next call tries it first. The record is only a
//! hint: losing it costs extra fallback attempts. Loading never fails, and
//! saving returns a [`PersistenceWarning`] the caller may log and ignore.
//!
//! Entries are never expired or removed.

use crate::error::PersistenceWarning;
use keyroll_core::TenantId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Tenant id -> id of the key that last worked. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceRecord(BTreeMap<String, String>);

impl PreferenceRecord {
    pub fn get(&self, tenant: &TenantId) -> Option<&str> {
        self.0.get(tenant.as_str()).map(String::as_str)
    }

    /// Record `key_id` for `tenant`, returning the previous preference.
    pub fn insert(&mut self, tenant: &TenantId, key_id: impl Into<String>) -> Option<String> {
        self.0.insert(tenant.as_str().to_string(), key_id.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(tenant, key id)` pairs in tenant order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(t, k)| (t.as_str(), k.as_str()))
    }
}

/// Snapshot storage for [`PreferenceRecord`]s.
pub trait PreferenceStore: Send + Sync {
    /// Read the snapshot. Any failure yields an empty record.
    fn load(&self) -> PreferenceRecord;

    /// Replace the snapshot.
    fn save(&self, record: &PreferenceRecord) -> Result<(), PersistenceWarning>;
}

/// JSON file snapshot, rewritten whole on every save.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn warning(&self, reason: impl ToString) -> PersistenceWarning {
        PersistenceWarning {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> PreferenceRecord {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no key preference snapshot yet");
                return PreferenceRecord::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable key preference snapshot");
                return PreferenceRecord::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt key preference snapshot");
                PreferenceRecord::default()
            }
        }
    }

    fn save(&self, record: &PreferenceRecord) -> Result<(), PersistenceWarning> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.warning(e))?;
        }

        let mut json = serde_json::to_string_pretty(record).map_err(|e| self.warning(e))?;
        json.push('\n');
        fs::write(&self.path, json).map_err(|e| self.warning(e))?;

        tracing::debug!(path = %self.path.display(), tenants = record.len(), "saved key preferences");
        Ok(())
    }
}

/// In-process store. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    record: Arc<RwLock<PreferenceRecord>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: PreferenceRecord) -> Self {
        Self {
            record: Arc::new(RwLock::new(record)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> PreferenceRecord {
        match self.record.read() {
            Ok(record) => record.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, record: &PreferenceRecord) -> Result<(), PersistenceWarning> {
        match self.record.write() {
            Ok(mut current) => *current = record.clone(),
            Err(poisoned) => *poisoned.into_inner() = record.clone(),
        }
        Ok(())
    }
}
