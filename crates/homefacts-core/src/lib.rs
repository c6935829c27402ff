//! homefacts-core — local account facts for configuration management.
//!
//! Provides:
//! - `collector` — account database, home directory and SSH public key collectors
//! - `selection` — the `homedir_users` allow-list and where it is read from
//! - `facts` — fact entries, the `FactSet` publisher and its renderings

pub mod collector;
pub mod facts;
pub mod selection;

pub use collector::{Collector, FileSystem, MockFs, RealFs};
pub use facts::{FactEntry, FactKind, FactSet, OutputFormat};
pub use selection::UserSelection;
