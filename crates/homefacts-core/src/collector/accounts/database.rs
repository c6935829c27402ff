//! Read-only views of the system account database.

use std::path::Path;

use tracing::{debug, warn};

use crate::collector::accounts::parser::{PasswdEntry, parse_passwd};
use crate::collector::traits::FileSystem;

/// Default location of the account database.
pub const DEFAULT_PASSWD_PATH: &str = "/etc/passwd";

/// One local account as seen by the collectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Account name, unique within the database.
    pub name: String,
    /// Home directory exactly as recorded in the database.
    pub home_directory: String,
}

impl From<&PasswdEntry> for UserRecord {
    fn from(entry: &PasswdEntry) -> Self {
        Self {
            name: entry.username.clone(),
            home_directory: entry.home.clone(),
        }
    }
}

/// Source of account records, by name or by full enumeration.
pub trait AccountDatabase {
    /// Looks up a single account by name.
    fn lookup(&self, name: &str) -> Option<UserRecord>;

    /// Returns every account, in database order. May contain repeated names.
    fn enumerate(&self) -> Vec<UserRecord>;
}

/// Account database backed by a passwd-format file.
///
/// The file is read once at load time; lookups never touch the filesystem.
#[derive(Debug, Clone, Default)]
pub struct PasswdDatabase {
    entries: Vec<PasswdEntry>,
}

impl PasswdDatabase {
    /// Creates a database from already parsed entries.
    pub fn from_entries(entries: Vec<PasswdEntry>) -> Self {
        Self { entries }
    }

    /// Parses passwd content.
    pub fn from_content(content: &str) -> Self {
        Self::from_entries(parse_passwd(content))
    }

    /// Loads the database from `path`.
    ///
    /// An unreadable file yields an empty database, so the run produces no
    /// facts instead of failing.
    pub fn load<F: FileSystem>(fs: &F, path: &Path) -> Self {
        match fs.read_to_string(path) {
            Ok(content) => {
                let db = Self::from_content(&content);
                debug!("loaded {} accounts from {}", db.len(), path.display());
                db
            }
            Err(e) => {
                warn!("cannot read account database {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Number of parsed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no account was parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AccountDatabase for PasswdDatabase {
    fn lookup(&self, name: &str) -> Option<UserRecord> {
        // Last entry wins, matching the keyed accumulation of full enumeration.
        self.entries
            .iter()
            .rev()
            .find(|e| e.username == name)
            .map(UserRecord::from)
    }

    fn enumerate(&self) -> Vec<UserRecord> {
        self.entries.iter().map(UserRecord::from).collect()
    }
}
