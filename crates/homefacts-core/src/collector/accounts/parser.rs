//! Parser for the passwd-format account database.
//!
//! Pure functions over file content, testable with string inputs.

/// Parsed entry from `/etc/passwd`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswdEntry {
    pub username: String,
    pub uid: u32,
    pub gid: u32,
    pub gecos: String,
    pub home: String,
    pub shell: String,
}

/// Parses `/etc/passwd` content into entries, in file order.
///
/// Format: username:password:uid:gid:gecos:home:shell
///
/// Blank lines, `#` comments, NIS compat lines (`+`/`-` prefixed), lines with
/// fewer than seven fields and lines with a non-numeric uid or gid are skipped.
/// The home field is kept verbatim.
pub fn parse_passwd(content: &str) -> Vec<PasswdEntry> {
    let mut entries = Vec::new();
    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('+') || line.starts_with('-') {
            continue;
        }
        let parts: Vec<&str> = line.splitn(7, ':').collect();
        if parts.len() < 7 || parts[0].is_empty() {
            continue;
        }
        let (Ok(uid), Ok(gid)) = (parts[2].parse::<u32>(), parts[3].parse::<u32>()) else {
            continue;
        };
        entries.push(PasswdEntry {
            username: parts[0].to_string(),
            uid,
            gid,
            gecos: parts[4].to_string(),
            home: parts[5].to_string(),
            shell: parts[6].to_string(),
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_passwd() {
        let content = "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin
user:x:1000:1000:User Name:/home/user:/bin/bash
";
        let entries = parse_passwd(content);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].username, "root");
        assert_eq!(entries[0].home, "/root");
        assert_eq!(entries[3].uid, 1000);
        assert_eq!(entries[3].gecos, "User Name");
        assert_eq!(entries[3].shell, "/bin/bash");
        assert_eq!(entries[2].gid, 65534);
    }

    #[test]
    fn test_parse_passwd_skips_noise() {
        let content = "\
# local accounts

root:x:0:0:root:/root:/bin/bash
+@netgroup::::::
-baduser::::::
short:x:5:5
badid:x:abc:0::/home/badid:/bin/sh
:x:7:7::/home/anon:/bin/sh
ok:x:9:9::/srv/ok:
";
        let entries = parse_passwd(content);
        let names: Vec<&str> = entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["root", "ok"]);
        assert_eq!(entries[1].shell, "");
    }

    #[test]
    fn test_parse_passwd_keeps_home_verbatim() {
        let content = "web:x:33:33:www:/var/www/:/usr/sbin/nologin\r\nlink:x:34:34::/home/link -> /data:/bin/sh\n";
        let entries = parse_passwd(content);
        assert_eq!(entries[0].home, "/var/www/");
        assert_eq!(entries[0].shell, "/usr/sbin/nologin");
        assert_eq!(entries[1].home, "/home/link -> /data");
    }

    #[test]
    fn test_parse_passwd_empty() {
        assert!(parse_passwd("").is_empty());
    }
}
