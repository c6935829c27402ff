//! Fact collectors for local accounts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Collector                           │
//! │   UserSelection ──▶ resolve() ──┬──▶ collect_home_facts()    │
//! │                        │        └──▶ SshKeyCollector         │
//! │                 ┌──────▼────────┐        │ ~/.ssh/id_*.pub   │
//! │                 │AccountDatabase│        │                   │
//! │                 │ (passwd file) │        │                   │
//! │                 └──────┬────────┘        │                   │
//! │                        └───────┬─────────┘                   │
//! │                         ┌──────▼──────┐                      │
//! │                         │  FileSystem │ (trait)              │
//! │                         └──────┬──────┘                      │
//! └────────────────────────────────┼─────────────────────────────┘
//!                          ┌───────┴───────┐
//!                   ┌──────▼──────┐ ┌──────▼──────┐
//!                   │   RealFs    │ │   MockFs    │
//!                   └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use homefacts_core::collector::{Collector, MockFs};
//! use homefacts_core::selection::UserSelection;
//!
//! let fs = MockFs::typical_host();
//! let mut collector = Collector::new(fs, "/etc/passwd");
//! let facts = collector.collect(&UserSelection::from_names(["alice"]));
//! assert_eq!(facts.get("home_alice"), Some("/home/alice"));
//! assert!(facts.contains("sshpubkey_alice"));
//! ```

pub mod accounts;
#[allow(clippy::module_inception)]
mod collector;
pub mod home;
pub mod mock;
pub mod sshkey;
pub mod traits;

pub use accounts::{AccountDatabase, PasswdDatabase, UserRecord, resolve};
#[cfg(unix)]
pub use accounts::SystemDatabase;
pub use collector::{Collector, CollectorTiming};
pub use home::collect_home_facts;
pub use mock::MockFs;
pub use sshkey::{KeyLookup, KeyMaterial, SshKeyCollector, collect_key_facts};
pub use traits::{FileSystem, RealFs};
