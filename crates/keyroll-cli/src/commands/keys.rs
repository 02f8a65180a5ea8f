//! `keyroll keys` - show the key ring in attempt order.

use keyroll_core::ResolvedConfig;
use keyroll_jwt::SigningKey;
use keyroll_runtime::{FilePreferenceStore, PreferenceRecord, PreferenceStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLine {
    pub id: String,
    pub location: String,
    pub learned: bool,
    /// `None` unless `--check` was given.
    pub check: Option<Result<(), String>>,
}

pub fn run(config: &ResolvedConfig, check: bool) -> anyhow::Result<()> {
    let record = FilePreferenceStore::new(&config.preference_path).load();
    let lines = describe(config, &record, check);

    println!("Key ring for tenant '{}' (attempt order):", config.tenant);
    for (position, line) in lines.iter().enumerate() {
        let marker = if line.learned { "*" } else { " " };
        let status = match &line.check {
            None => String::new(),
            Some(Ok(())) => "  ✔ loads".to_string(),
            Some(Err(reason)) => format!("  ✘ {reason}"),
        };
        println!("{marker} {}. {} -> {}{status}", position + 1, line.id, line.location);
    }

    if !lines.iter().any(|l| l.learned) {
        println!();
        println!("No learned key for this tenant yet.");
    }

    Ok(())
}

pub fn describe(config: &ResolvedConfig, record: &PreferenceRecord, check: bool) -> Vec<KeyLine> {
    let learned = record.get(&config.tenant);

    config
        .keyring
        .ordered(learned)
        .into_iter()
        .map(|entry| KeyLine {
            id: entry.id.clone(),
            location: entry.location.clone(),
            learned: learned == Some(entry.id.as_str()),
            check: check.then(|| SigningKey::load(entry).map(|_| ()).map_err(|e| e.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyroll_core::KeyrollConfig;
    use keyroll_jwt::testutil;

    fn config(keys: String) -> ResolvedConfig {
        KeyrollConfig {
            client_id: Some("3MVG9client".to_string()),
            username: Some("integration@example.com".to_string()),
            keys: Some(keys),
            tenant: Some("acme".to_string()),
            ..Default::default()
        }
        .resolve()
        .unwrap()
    }

    #[test]
    fn test_learned_key_listed_first() {
        let config = config("a:/keys/a.pem,b:/keys/b.pem,c:/keys/c.pem".to_string());
        let mut record = PreferenceRecord::default();
        record.insert(&config.tenant, "b");

        let lines = describe(&config, &record, false);
        let ids: Vec<_> = lines.iter().map(|l| l.id.as_str()).collect();

        assert_eq!(ids, ["b", "a", "c"]);
        assert!(lines[0].learned);
        assert!(lines.iter().all(|l| l.check.is_none()));
    }

    #[test]
    fn test_check_reports_unreadable_keys() {
        let dir = testutil::fixture_key_dir();
        let keys = format!(
            "2025:{},old:{}",
            dir.path().join("key-2025.pem").display(),
            dir.path().join("missing.pem").display()
        );
        let config = config(keys);

        let lines = describe(&config, &PreferenceRecord::default(), true);

        assert_eq!(lines[0].check, Some(Ok(())));
        assert!(matches!(lines[1].check, Some(Err(_))));
        assert!(!lines[0].learned);
    }
}
