//! Key-ring parsing.
//!
//! A key ring is configured either as a delimited list of `id:location` pairs
//! (`"2025:/keys/key-2025.pem,2030:/keys/key-2030.pem"`) or as a single
//! fallback location, which gets the id `"default"`. Malformed parts are
//! skipped; only an empty result is an error.

use crate::config::expand_home;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One candidate signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// Rotation label (e.g. a year or version tag). Sent as the JWT `kid`.
    pub id: String,

    /// Where the PEM-encoded private key is read from.
    pub location: String,
}

impl KeyEntry {
    /// Id given to the single fallback key.
    pub const DEFAULT_ID: &'static str = "default";

    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
        }
    }

    /// The key location with a leading `~` expanded.
    pub fn path(&self) -> PathBuf {
        expand_home(&self.location)
    }
}

/// Ordered, non-empty collection of candidate signing keys.
///
/// Order is the fallback order used when no learned preference applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRing {
    entries: Vec<KeyEntry>,
}

impl KeyRing {
    /// Build a ring from explicit entries.
    pub fn new(entries: Vec<KeyEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyKeyRing);
        }
        Ok(Self { entries })
    }

    /// Parse a delimited `id:location,...` specification.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        Self::new(parse_entries(spec))
    }

    /// Build the ring from the configured specification or, when that is
    /// absent or blank, from the single fallback location.
    ///
    /// A non-blank specification always wins, even if every part in it is
    /// malformed.
    pub fn from_sources(spec: Option<&str>, fallback: Option<&str>) -> Result<Self, ConfigError> {
        match (spec.map(str::trim), fallback.map(str::trim)) {
            (Some(spec), _) if !spec.is_empty() => Self::parse(spec),
            (_, Some(location)) if !location.is_empty() => {
                Self::new(vec![KeyEntry::new(KeyEntry::DEFAULT_ID, location)])
            }
            _ => Err(ConfigError::EmptyKeyRing),
        }
    }

    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed ring.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Attempt order for a given preferred key id.
    ///
    /// Entries whose id matches `preferred` move to the front; everything
    /// else keeps its relative order. An unknown or absent preference leaves
    /// the configured order unchanged.
    pub fn ordered(&self, preferred: Option<&str>) -> Vec<&KeyEntry> {
        match preferred {
            Some(id) => {
                let (mut front, rest): (Vec<&KeyEntry>, Vec<&KeyEntry>) =
                    self.entries.iter().partition(|e| e.id == id);
                front.extend(rest);
                front
            }
            None => self.entries.iter().collect(),
        }
    }
}

/// Parse `id:location` pairs, skipping anything malformed.
///
/// Each part is split on its first `:` only, so locations may themselves
/// contain colons.
pub fn parse_entries(spec: &str) -> Vec<KeyEntry> {
    let mut entries = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let Some((id, location)) = part.split_once(':') else {
            tracing::debug!(entry = part, "skipping key-ring entry without id:location delimiter");
            continue;
        };

        let (id, location) = (id.trim(), location.trim());
        if id.is_empty() || location.is_empty() {
            tracing::debug!(entry = part, "skipping key-ring entry with empty id or location");
            continue;
        }

        entries.push(KeyEntry::new(id, location));
    }

    entries
}
