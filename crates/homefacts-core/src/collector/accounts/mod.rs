//! Local account database and user selection resolution.

pub mod database;
pub mod parser;
pub mod resolver;
#[cfg(unix)]
pub mod system;

pub use database::{AccountDatabase, DEFAULT_PASSWD_PATH, PasswdDatabase, UserRecord};
pub use parser::{PasswdEntry, parse_passwd};
pub use resolver::resolve;
#[cfg(unix)]
pub use system::SystemDatabase;
