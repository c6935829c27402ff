//! User selection: which accounts the collectors process.
//!
//! The selection comes from the `homedir_users` fact. It can be given
//! directly (command line, `FACTER_homedir_users`) or defined in the host's
//! external facts directories, for example:
//!
//! ```text
//! $ cat /etc/facter/facts.d/homedir_users.yaml
//! ---
//! homedir_users:
//!   - root
//!   - jdoe
//! ```
//!
//! When no definition is found, or the list is empty, every account is used.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::collector::traits::FileSystem;

/// Name of the fact holding the explicit user list.
pub const HOMEDIR_USERS_FACT: &str = "homedir_users";

/// External facts directories searched when none are configured.
pub const DEFAULT_FACTS_DIRS: [&str; 2] = ["/etc/facter/facts.d", "/etc/puppetlabs/facter/facts.d"];

/// Which accounts to process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserSelection {
    /// Every account in the database.
    #[default]
    All,
    /// Only these names, in the order given.
    Named(Vec<String>),
}

impl UserSelection {
    /// Builds a selection from requested names.
    ///
    /// Names are trimmed and empty ones dropped; if nothing is left the
    /// selection is `All`.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            UserSelection::All
        } else {
            UserSelection::Named(names)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, UserSelection::All)
    }
}

impl fmt::Display for UserSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSelection::All => f.write_str("all users"),
            UserSelection::Named(names) => write!(f, "{}", names.join(",")),
        }
    }
}

/// Error type for reading an external facts file.
#[derive(Debug)]
pub enum SelectionError {
    Io(io::Error),
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::Io(e) => write!(f, "I/O error: {}", e),
            SelectionError::Yaml(e) => write!(f, "invalid YAML: {}", e),
            SelectionError::Json(e) => write!(f, "invalid JSON: {}", e),
        }
    }
}

impl std::error::Error for SelectionError {}

impl From<io::Error> for SelectionError {
    fn from(e: io::Error) -> Self {
        SelectionError::Io(e)
    }
}

impl From<serde_yaml::Error> for SelectionError {
    fn from(e: serde_yaml::Error) -> Self {
        SelectionError::Yaml(e)
    }
}

impl From<serde_json::Error> for SelectionError {
    fn from(e: serde_json::Error) -> Self {
        SelectionError::Json(e)
    }
}

/// Picks the selection for a run.
///
/// Explicit names win; otherwise the external facts directories are searched.
pub fn load_selection<F: FileSystem>(
    fs: &F,
    explicit: &[String],
    facts_dirs: &[PathBuf],
) -> UserSelection {
    let selection = UserSelection::from_names(explicit);
    if !selection.is_all() {
        debug!("using explicit user selection: {}", selection);
        return selection;
    }
    load_from_facts_dirs(fs, facts_dirs)
}

/// Searches `dirs` for a `homedir_users` definition.
///
/// Directories are visited in order and files within a directory by name;
/// the last file that defines the fact wins. Missing directories are skipped
/// quietly, broken files with a warning.
pub fn load_from_facts_dirs<F: FileSystem>(fs: &F, dirs: &[PathBuf]) -> UserSelection {
    let mut found: Option<(PathBuf, Vec<String>)> = None;

    for dir in dirs {
        let mut files = match fs.read_dir(dir) {
            Ok(files) => files,
            Err(e) => {
                trace!("skipping facts directory {}: {}", dir.display(), e);
                continue;
            }
        };
        files.sort();

        for path in files {
            match read_fact_file(fs, &path) {
                Ok(Some(names)) => found = Some((path, names)),
                Ok(None) => {}
                Err(e) => warn!("ignoring facts file {}: {}", path.display(), e),
            }
        }
    }

    match found {
        Some((path, names)) => {
            let selection = UserSelection::from_names(names);
            debug!(
                "{} defined in {}: {}",
                HOMEDIR_USERS_FACT,
                path.display(),
                selection
            );
            selection
        }
        None => {
            debug!("{} not defined, using all users", HOMEDIR_USERS_FACT);
            UserSelection::All
        }
    }
}

/// Reads `homedir_users` from one external facts file.
///
/// Returns `Ok(None)` when the file type is not supported or the file does
/// not define the fact as a list.
pub fn read_fact_file<F: FileSystem>(
    fs: &F,
    path: &Path,
) -> Result<Option<Vec<String>>, SelectionError> {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Ok(None);
    };
    let names = match ext {
        "yaml" | "yml" => {
            let content = fs.read_to_string(path)?;
            parse_yaml_facts(&content)?
        }
        "json" => {
            let content = fs.read_to_string(path)?;
            parse_json_facts(&content)?
        }
        "txt" => {
            let content = fs.read_to_string(path)?;
            parse_text_facts(&content)
        }
        _ => return Ok(None),
    };
    Ok(names)
}

/// Extracts `homedir_users` from a YAML facts document.
pub fn parse_yaml_facts(content: &str) -> Result<Option<Vec<String>>, serde_yaml::Error> {
    let doc: serde_yaml::Value = serde_yaml::from_str(content)?;
    let Some(value) = doc.get(HOMEDIR_USERS_FACT) else {
        return Ok(None);
    };
    let Some(items) = value.as_sequence() else {
        warn!("{} is not a list, ignoring", HOMEDIR_USERS_FACT);
        return Ok(None);
    };
    let mut names = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(name) => names.push(name.to_string()),
            None => warn!("ignoring non-string {} entry {:?}", HOMEDIR_USERS_FACT, item),
        }
    }
    Ok(Some(names))
}

/// Extracts `homedir_users` from a JSON facts document.
pub fn parse_json_facts(content: &str) -> Result<Option<Vec<String>>, serde_json::Error> {
    let doc: serde_json::Value = serde_json::from_str(content)?;
    let Some(value) = doc.get(HOMEDIR_USERS_FACT) else {
        return Ok(None);
    };
    let Some(items) = value.as_array() else {
        warn!("{} is not a list, ignoring", HOMEDIR_USERS_FACT);
        return Ok(None);
    };
    let mut names = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(name) => names.push(name.to_string()),
            None => warn!("ignoring non-string {} entry {}", HOMEDIR_USERS_FACT, item),
        }
    }
    Ok(Some(names))
}

/// Extracts `homedir_users=a,b` from a `key=value` facts file.
pub fn parse_text_facts(content: &str) -> Option<Vec<String>> {
    let mut names = None;
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim() == HOMEDIR_USERS_FACT {
            names = Some(value.split(',').map(|n| n.trim().to_string()).collect());
        }
    }
    names
}
