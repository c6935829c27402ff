//! Resolves a user selection to the account records the collectors process.

use std::collections::BTreeMap;

use tracing::debug;

use crate::collector::accounts::database::{AccountDatabase, UserRecord};
use crate::selection::UserSelection;

/// Resolves `selection` against `db`.
///
/// - `UserSelection::Named`: one record per name the database knows; unknown
///   names are skipped.
/// - `UserSelection::All`: every account in the database.
///
/// Records are keyed by name (last seen wins), so the output never repeats a
/// username, and comes back sorted by name.
pub fn resolve<A: AccountDatabase + ?Sized>(
    db: &A,
    selection: &UserSelection,
) -> Vec<UserRecord> {
    let mut users: BTreeMap<String, String> = BTreeMap::new();

    match selection {
        UserSelection::All => {
            for record in db.enumerate() {
                users.insert(record.name, record.home_directory);
            }
        }
        UserSelection::Named(names) => {
            for name in names {
                match db.lookup(name) {
                    Some(record) => {
                        users.insert(record.name, record.home_directory);
                    }
                    None => debug!("skipping unknown user '{}'", name),
                }
            }
        }
    }

    users
        .into_iter()
        .map(|(name, home_directory)| UserRecord {
            name,
            home_directory,
        })
        .collect()
}
