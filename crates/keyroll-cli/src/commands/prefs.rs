//! `keyroll prefs` - print learned key preferences.

use keyroll_core::KeyrollConfig;
use keyroll_runtime::{FilePreferenceStore, PreferenceRecord, PreferenceStore};
use std::path::PathBuf;

/// Needs only the snapshot location, so identity settings are not required.
pub fn run(config: &KeyrollConfig) -> anyhow::Result<()> {
    let (path, record) = snapshot(config);

    if record.is_empty() {
        println!("No learned keys in {}", path.display());
        return Ok(());
    }

    println!("Learned keys in {}:", path.display());
    for line in render(&record) {
        println!("  {line}");
    }

    Ok(())
}

/// The snapshot location and its current contents.
pub fn snapshot(config: &KeyrollConfig) -> (PathBuf, PreferenceRecord) {
    let path = config.preference_path();
    let record = FilePreferenceStore::new(&path).load();
    (path, record)
}

pub fn render(record: &PreferenceRecord) -> Vec<String> {
    record
        .iter()
        .map(|(tenant, key_id)| format!("{tenant} -> {key_id}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_snapshot_path_is_trimmed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keymap.json");
        fs::write(&path, r#"{"acme": "b", "globex": "2030"}"#).unwrap();

        let config = KeyrollConfig {
            keymap_path: Some(format!(" {} ", path.display())),
            ..Default::default()
        };
        let (resolved, record) = snapshot(&config);

        assert_eq!(resolved, path);
        assert_eq!(render(&record), ["acme -> b", "globex -> 2030"]);
    }

    #[test]
    fn test_missing_snapshot_is_empty() {
        let dir = tempdir().unwrap();
        let config = KeyrollConfig {
            keymap_path: Some(dir.path().join("absent.json").display().to_string()),
            ..Default::default()
        };

        let (_, record) = snapshot(&config);
        assert!(record.is_empty());
        assert!(render(&record).is_empty());
    }
}
