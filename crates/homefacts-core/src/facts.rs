//! Fact entries and the publisher that collects them.
//!
//! Collectors return plain `FactEntry` values; a `FactSet` accumulates them
//! keyed by fact name and renders the result in a format the host fact system
//! reads from an executable external fact.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

/// Prefix of the home directory facts (`home_<user>`).
pub const HOME_FACT_PREFIX: &str = "home_";

/// Prefix of the SSH public key facts (`sshpubkey_<user>`).
pub const SSH_KEY_FACT_PREFIX: &str = "sshpubkey_";

/// A single named fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactEntry {
    pub name: String,
    pub value: String,
}

impl FactEntry {
    /// Builds the `home_<user>` fact.
    pub fn home(user: &str, home_directory: impl Into<String>) -> Self {
        Self {
            name: format!("{HOME_FACT_PREFIX}{user}"),
            value: home_directory.into(),
        }
    }

    /// Builds the `sshpubkey_<user>` fact.
    pub fn ssh_key(user: &str, key: impl Into<String>) -> Self {
        Self {
            name: format!("{SSH_KEY_FACT_PREFIX}{user}"),
            value: key.into(),
        }
    }
}

/// Which collector produced a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactKind {
    /// `home_<user>` facts.
    Home,
    /// `sshpubkey_<user>` facts.
    SshPubKey,
}

impl FactKind {
    /// All kinds, in collection order.
    pub const ALL: [FactKind; 2] = [FactKind::Home, FactKind::SshPubKey];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactKind::Home => "home",
            FactKind::SshPubKey => "sshpubkey",
        }
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "home" => Ok(FactKind::Home),
            "sshpubkey" => Ok(FactKind::SshPubKey),
            other => Err(format!(
                "unknown fact kind '{}' (expected 'home' or 'sshpubkey')",
                other
            )),
        }
    }
}

/// Rendering of a `FactSet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `name=value` lines.
    Text,
    /// JSON object, values verbatim.
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!(
                "unknown output format '{}' (expected text, json or yaml)",
                other
            )),
        }
    }
}

/// Error type for rendering failures.
#[derive(Debug)]
pub enum RenderError {
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Json(e) => write!(f, "JSON encoding failed: {}", e),
            RenderError::Yaml(e) => write!(f, "YAML encoding failed: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Json(e)
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(e: serde_yaml::Error) -> Self {
        RenderError::Yaml(e)
    }
}

/// Facts published during one run, keyed by name.
///
/// Publishing a name twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FactSet {
    facts: BTreeMap<String, String>,
}

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one fact.
    pub fn publish(&mut self, entry: FactEntry) {
        self.facts.insert(entry.name, entry.value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.facts.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.facts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterates facts sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.facts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders all facts.
    ///
    /// Text output drops trailing line terminators from each value, since a
    /// line ends the value there. A value with a line break anywhere else
    /// would read back as extra facts, so it is left out. JSON and YAML carry
    /// values verbatim.
    pub fn render(&self, format: OutputFormat) -> Result<String, RenderError> {
        match format {
            OutputFormat::Text => {
                let mut out = String::new();
                for (name, value) in self.iter() {
                    let value = value.trim_end_matches(['\n', '\r']);
                    if value.contains(['\n', '\r']) {
                        warn!("omitting {} from text output: value spans several lines", name);
                        continue;
                    }
                    out.push_str(name);
                    out.push('=');
                    out.push_str(value);
                    out.push('\n');
                }
                Ok(out)
            }
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(self)?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }
}

impl Extend<FactEntry> for FactSet {
    fn extend<T: IntoIterator<Item = FactEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.publish(entry);
        }
    }
}

impl FromIterator<FactEntry> for FactSet {
    fn from_iter<T: IntoIterator<Item = FactEntry>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
