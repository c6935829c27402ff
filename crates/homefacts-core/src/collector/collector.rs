//! Main collector that runs the home and SSH key collectors.
//!
//! The `Collector` struct provides a single entry point producing the
//! `FactSet` for one run.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::collector::accounts::{AccountDatabase, PasswdDatabase, resolve};
use crate::collector::home::collect_home_facts;
use crate::collector::sshkey::SshKeyCollector;
use crate::collector::traits::FileSystem;
use crate::facts::{FactKind, FactSet};
use crate::selection::UserSelection;

/// Timing information for each collector phase.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    /// Total collection time.
    pub total: Duration,
    /// Time to resolve users and build home facts.
    pub home: Duration,
    /// Time to resolve users and read SSH keys.
    pub sshpubkey: Duration,
}

/// Runs the enabled fact collectors against one account database.
pub struct Collector<F: FileSystem, A: AccountDatabase = PasswdDatabase> {
    accounts: A,
    ssh_collector: SshKeyCollector<F>,
    kinds: Vec<FactKind>,
    /// Timing information from the last collect call.
    last_timing: Option<CollectorTiming>,
}

impl<F: FileSystem> Collector<F, PasswdDatabase> {
    /// Creates a collector reading accounts from the passwd file at `passwd_path`.
    ///
    /// An unreadable passwd file leaves the collector with no accounts.
    pub fn new(fs: F, passwd_path: impl AsRef<Path>) -> Self {
        let accounts = PasswdDatabase::load(&fs, passwd_path.as_ref());
        Self::with_accounts(fs, accounts)
    }
}

impl<F: FileSystem, A: AccountDatabase> Collector<F, A> {
    /// Creates a collector over an arbitrary account database.
    pub fn with_accounts(fs: F, accounts: A) -> Self {
        Self {
            accounts,
            ssh_collector: SshKeyCollector::new(fs),
            kinds: FactKind::ALL.to_vec(),
            last_timing: None,
        }
    }

    /// Restricts collection to `kinds`. An empty list enables every kind.
    pub fn with_kinds(mut self, kinds: &[FactKind]) -> Self {
        let mut kinds = kinds.to_vec();
        kinds.sort();
        kinds.dedup();
        self.kinds = if kinds.is_empty() {
            FactKind::ALL.to_vec()
        } else {
            kinds
        };
        self
    }

    /// Enabled fact kinds, in collection order.
    pub fn kinds(&self) -> &[FactKind] {
        &self.kinds
    }

    /// Returns timing information from the last collect call.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }

    /// Collects all enabled facts for `selection`.
    ///
    /// Each collector resolves the selection on its own. Nothing here fails:
    /// unknown users, missing keys and unreadable files only leave facts out.
    pub fn collect(&mut self, selection: &UserSelection) -> FactSet {
        let total_start = Instant::now();
        let mut timing = CollectorTiming::default();
        let mut facts = FactSet::new();

        for kind in self.kinds.clone() {
            let start = Instant::now();
            let records = resolve(&self.accounts, selection);
            let before = facts.len();
            match kind {
                FactKind::Home => {
                    facts.extend(collect_home_facts(&records));
                    timing.home = start.elapsed();
                }
                FactKind::SshPubKey => {
                    facts.extend(self.ssh_collector.collect(&records));
                    timing.sshpubkey = start.elapsed();
                }
            }
            debug!(
                "{}: {} users, {} facts",
                kind,
                records.len(),
                facts.len() - before
            );
        }

        timing.total = total_start.elapsed();
        debug!(
            "collected {} facts in {:?} (home={:?}, sshpubkey={:?})",
            facts.len(),
            timing.total,
            timing.home,
            timing.sshpubkey
        );
        self.last_timing = Some(timing);
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{ALICE_RSA_KEY, BOB_DSA_KEY, MOCK_PASSWD_PATH, MockFs};

    fn collector(fs: MockFs) -> Collector<MockFs> {
        Collector::new(fs, MOCK_PASSWD_PATH)
    }

    #[test]
    fn test_collect_all_users() {
        let mut collector = collector(MockFs::typical_host());
        let facts = collector.collect(&UserSelection::All);

        for (user, home) in [
            ("root", "/root"),
            ("daemon", "/usr/sbin"),
            ("nobody", "/nonexistent"),
            ("alice", "/home/alice"),
            ("bob", "/home/bob"),
            ("carol", "/home/carol/"),
        ] {
            assert_eq!(facts.get(&format!("home_{user}")), Some(home));
        }
        assert_eq!(facts.get("sshpubkey_alice"), Some(ALICE_RSA_KEY));
        assert_eq!(facts.get("sshpubkey_bob"), Some(BOB_DSA_KEY));
        assert!(!facts.contains("sshpubkey_root"));
        assert!(!facts.contains("sshpubkey_carol"));
        assert_eq!(facts.len(), 8);
        assert!(collector.last_timing().is_some());
    }

    #[test]
    fn test_collect_root_and_ghost() {
        let mut fs = MockFs::new();
        fs.add_user("root", 0, "/root");
        let mut collector = collector(fs);

        let facts = collector.collect(&UserSelection::from_names(["root", "ghost"]));

        let all: Vec<(&str, &str)> = facts.iter().collect();
        assert_eq!(all, vec![("home_root", "/root")]);
    }

    #[test]
    fn test_collect_selected_users() {
        let mut collector = collector(MockFs::typical_host());
        let facts = collector.collect(&UserSelection::from_names(["bob", "ghost"]));

        let names: Vec<&str> = facts.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["home_bob", "sshpubkey_bob"]);
    }

    #[test]
    fn test_collect_only_keys() {
        let mut collector = collector(MockFs::typical_host()).with_kinds(&[FactKind::SshPubKey]);
        let facts = collector.collect(&UserSelection::All);

        assert_eq!(facts.len(), 2);
        assert!(facts.iter().all(|(name, _)| name.starts_with("sshpubkey_")));
    }

    #[test]
    fn test_with_kinds_normalizes() {
        let collector = collector(MockFs::new())
            .with_kinds(&[FactKind::SshPubKey, FactKind::Home, FactKind::SshPubKey]);
        assert_eq!(collector.kinds(), &[FactKind::Home, FactKind::SshPubKey]);

        let collector = collector.with_kinds(&[]);
        assert_eq!(collector.kinds(), &FactKind::ALL);
    }

    #[test]
    fn test_multiline_key_cannot_override_other_facts() {
        use crate::facts::OutputFormat;

        let mut fs = MockFs::new();
        fs.add_user("root", 0, "/root");
        fs.add_user("mallory", 1666, "/home/mallory");
        fs.add_ssh_key(
            "/home/mallory",
            "id_rsa.pub",
            "ssh-rsa AAAA m\nhome_root=/tmp/evil\n",
        );
        let facts = collector(fs).collect(&UserSelection::All);

        let text = facts.render(OutputFormat::Text).unwrap();
        let mut parsed = std::collections::HashMap::new();
        for line in text.lines() {
            if let Some((name, value)) = line.split_once('=') {
                parsed.insert(name, value);
            }
        }
        assert_eq!(parsed.get("home_root"), Some(&"/root"));
        assert!(!parsed.contains_key("sshpubkey_mallory"));
        assert_eq!(text.lines().count(), 2);

        assert_eq!(
            facts.get("sshpubkey_mallory"),
            Some("ssh-rsa AAAA m\nhome_root=/tmp/evil\n")
        );
    }

    #[test]
    fn test_missing_passwd_yields_no_facts() {
        let mut collector = collector(MockFs::new());
        assert!(collector.collect(&UserSelection::All).is_empty());
        assert!(
            collector
                .collect(&UserSelection::from_names(["root"]))
                .is_empty()
        );
    }

    #[test]
    fn test_custom_account_database() {
        struct Fixed;

        impl AccountDatabase for Fixed {
            fn lookup(&self, name: &str) -> Option<crate::collector::accounts::UserRecord> {
                self.enumerate().into_iter().find(|r| r.name == name)
            }

            fn enumerate(&self) -> Vec<crate::collector::accounts::UserRecord> {
                vec![crate::collector::accounts::UserRecord {
                    name: "svc".into(),
                    home_directory: "/srv/svc".into(),
                }]
            }
        }

        let mut fs = MockFs::new();
        fs.add_ssh_key("/srv/svc", "id_rsa.pub", "ssh-rsa AAAA svc\n");
        let mut collector = Collector::with_accounts(fs, Fixed);
        let facts = collector.collect(&UserSelection::All);

        assert_eq!(facts.get("home_svc"), Some("/srv/svc"));
        assert_eq!(facts.get("sshpubkey_svc"), Some("ssh-rsa AAAA svc\n"));
    }
}
