//! Account database backed by the C library's name service switch.
//!
//! Goes through `getpwnam`/`getpwent`, so accounts served by LDAP, sssd or
//! any other NSS module resolve the same way they do for `id` or `getent`.

use tracing::{debug, trace};
use uzers::User;
use uzers::os::unix::UserExt;

use crate::collector::accounts::database::{AccountDatabase, UserRecord};

/// The host's account database as seen through NSS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDatabase;

impl SystemDatabase {
    pub fn new() -> Self {
        Self
    }
}

fn to_record(user: &User) -> Option<UserRecord> {
    let Some(name) = user.name().to_str() else {
        debug!("skipping account with non UTF-8 name {:?}", user.name());
        return None;
    };
    Some(UserRecord {
        name: name.to_string(),
        home_directory: user.home_dir().to_string_lossy().into_owned(),
    })
}

impl AccountDatabase for SystemDatabase {
    fn lookup(&self, name: &str) -> Option<UserRecord> {
        let user = uzers::get_user_by_name(name);
        if user.is_none() {
            trace!("getpwnam({}) found nothing", name);
        }
        user.as_ref().and_then(to_record)
    }

    fn enumerate(&self) -> Vec<UserRecord> {
        // SAFETY: getpwent keeps iteration state in libc globals. The
        // collectors are single-threaded and nothing else in this process
        // walks the account database concurrently.
        let users: Vec<User> = unsafe { uzers::all_users() }.collect();
        users.iter().filter_map(to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::accounts::resolve;
    use crate::selection::UserSelection;

    const MISSING_USER: &str = "homefacts-no-such-user-4242";

    fn lookup_via<A: AccountDatabase>(db: &A, name: &str) -> Option<UserRecord> {
        db.lookup(name)
    }

    #[test]
    fn test_lookup_root() {
        let root = lookup_via(&SystemDatabase::new(), "root").unwrap();
        assert_eq!(root.name, "root");
        assert!(!root.home_directory.is_empty());
    }

    #[test]
    fn test_lookup_missing() {
        assert!(lookup_via(&SystemDatabase::new(), MISSING_USER).is_none());
    }

    #[test]
    fn test_enumerate_contains_root() {
        let records = SystemDatabase::new().enumerate();
        assert!(records.iter().any(|r| r.name == "root"));
    }

    #[test]
    fn test_resolve_named_through_nss() {
        let selection = UserSelection::from_names(["root", MISSING_USER]);
        let records = resolve(&SystemDatabase::new(), &selection);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "root");
        assert_eq!(
            Some(records[0].clone()),
            SystemDatabase::new().lookup("root")
        );
    }
}
