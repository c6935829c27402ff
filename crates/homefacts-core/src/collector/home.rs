//! Home directory facts.

use std::collections::BTreeMap;

use crate::collector::accounts::UserRecord;
use crate::facts::FactEntry;

/// Produces one `home_<user>` fact per record, value verbatim.
///
/// A username repeated in `records` keeps its last home directory.
pub fn collect_home_facts(records: &[UserRecord]) -> Vec<FactEntry> {
    let mut homes: BTreeMap<&str, &str> = BTreeMap::new();
    for record in records {
        homes.insert(&record.name, &record.home_directory);
    }
    homes
        .into_iter()
        .map(|(user, home)| FactEntry::home(user, home))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, home: &str) -> UserRecord {
        UserRecord {
            name: name.to_string(),
            home_directory: home.to_string(),
        }
    }

    #[test]
    fn test_collect_home_facts() {
        let facts = collect_home_facts(&[record("root", "/root"), record("alice", "/home/alice")]);
        assert_eq!(
            facts,
            vec![
                FactEntry {
                    name: "home_alice".into(),
                    value: "/home/alice".into()
                },
                FactEntry {
                    name: "home_root".into(),
                    value: "/root".into()
                },
            ]
        );
    }

    #[test]
    fn test_home_kept_verbatim() {
        let facts = collect_home_facts(&[
            record("carol", "/home/carol/"),
            record("svc", ""),
            record("odd", "relative/home"),
        ]);
        let values: Vec<&str> = facts.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["/home/carol/", "relative/home", ""]);
    }

    #[test]
    fn test_duplicate_user_last_wins() {
        let facts = collect_home_facts(&[record("dup", "/first"), record("dup", "/second")]);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].value, "/second");
    }

    #[test]
    fn test_no_records() {
        assert!(collect_home_facts(&[]).is_empty());
    }
}
