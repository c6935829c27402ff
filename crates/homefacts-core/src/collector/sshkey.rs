//! SSH public key discovery under each user's home directory.
//!
//! For every user the candidates below are probed in order; the first one that
//! exists is read whole and becomes the `sshpubkey_<user>` fact. Later
//! candidates are never touched once an earlier one exists.
//!
//! ```text
//! NOT_CHECKED ─▶ id_rsa.pub exists? ──yes──▶ read ─▶ Found | Unreadable
//!                      │no
//!                      ▼
//!                id_dsa.pub exists? ──yes──▶ read ─▶ Found | Unreadable
//!                      │no
//!                      ▼
//!                   Absent
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use tracing::{trace, warn};

use crate::collector::accounts::UserRecord;
use crate::collector::traits::FileSystem;
use crate::facts::FactEntry;

/// Public key file names under `~/.ssh`, highest priority first.
pub const KEY_CANDIDATES: [&str; 2] = ["id_rsa.pub", "id_dsa.pub"];

/// Public key read for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub owner: String,
    pub path: PathBuf,
    /// File content, unmodified.
    pub content: String,
}

/// Outcome of probing one user's key candidates.
#[derive(Debug)]
pub enum KeyLookup {
    Found(KeyMaterial),
    /// No candidate file exists.
    Absent,
    /// A candidate exists but could not be read.
    Unreadable { path: PathBuf, error: io::Error },
}

/// Path of `candidate` for `home`, joined the way the shell would
/// concatenate `"{home}/.ssh/{candidate}"`.
pub fn candidate_path(home: &str, candidate: &str) -> PathBuf {
    PathBuf::from(format!("{home}/.ssh/{candidate}"))
}

/// Collects SSH public keys for resolved users.
pub struct SshKeyCollector<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> SshKeyCollector<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Probes the candidates for a single user.
    pub fn find_key(&self, record: &UserRecord) -> KeyLookup {
        for candidate in KEY_CANDIDATES {
            let path = candidate_path(&record.home_directory, candidate);
            if !self.fs.exists(&path) {
                trace!("{}: no {}", record.name, path.display());
                continue;
            }
            return match self.fs.read_to_string(&path) {
                Ok(content) => KeyLookup::Found(KeyMaterial {
                    owner: record.name.clone(),
                    path,
                    content,
                }),
                Err(error) => KeyLookup::Unreadable { path, error },
            };
        }
        KeyLookup::Absent
    }

    /// Produces one `sshpubkey_<user>` fact per record that has a readable key.
    ///
    /// Users without a key, or whose key file cannot be read, get no fact.
    pub fn collect(&self, records: &[UserRecord]) -> Vec<FactEntry> {
        let mut keys: BTreeMap<String, String> = BTreeMap::new();
        for record in records {
            match self.find_key(record) {
                KeyLookup::Found(key) => {
                    trace!("{}: using {}", key.owner, key.path.display());
                    keys.insert(key.owner, key.content);
                }
                KeyLookup::Absent => {}
                KeyLookup::Unreadable { path, error } => {
                    warn!(
                        "skipping SSH key of '{}': cannot read {}: {}",
                        record.name,
                        path.display(),
                        error
                    );
                }
            }
        }
        keys.into_iter()
            .map(|(user, key)| FactEntry::ssh_key(&user, key))
            .collect()
    }
}

/// Convenience wrapper around [`SshKeyCollector::collect`].
pub fn collect_key_facts<F: FileSystem>(fs: F, records: &[UserRecord]) -> Vec<FactEntry> {
    SshKeyCollector::new(fs).collect(records)
}
