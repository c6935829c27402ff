//! In-memory mock filesystem for testing collectors without a real host.
//!
//! `MockFs` simulates the handful of paths the collectors touch (the passwd
//! file, facts directories, home directories with `.ssh` key files) so tests
//! never depend on the accounts of the machine running them.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// Default location of the passwd file inside a mock host.
pub const MOCK_PASSWD_PATH: &str = "/etc/passwd";

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
    /// Files that exist but fail to read with `PermissionDenied`.
    unreadable: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.unreadable.remove(&path);
        self.files.insert(path, content.into());
    }

    /// Adds a file that exists but cannot be read (mode 0600 owned by another user).
    pub fn add_unreadable_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.remove(&path);
        self.unreadable.insert(path);
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    /// Appends an account line to `/etc/passwd` and creates its home directory.
    pub fn add_user(&mut self, name: &str, uid: u32, home: &str) {
        let mut passwd = self
            .files
            .get(Path::new(MOCK_PASSWD_PATH))
            .cloned()
            .unwrap_or_default();
        passwd.push_str(&format!("{name}:x:{uid}:{uid}:{name}:{home}:/bin/bash\n"));
        self.add_file(MOCK_PASSWD_PATH, passwd);
        if !home.is_empty() {
            self.add_dir(home);
        }
    }

    /// Places a public key file named `file_name` under `{home}/.ssh/`.
    pub fn add_ssh_key(&mut self, home: &str, file_name: &str, content: impl Into<String>) {
        self.add_file(format!("{home}/.ssh/{file_name}"), content);
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
            || self.directories.contains(path)
            || self.unreadable.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = HashSet::new();

        for file_path in self.files.keys().chain(self.unreadable.iter()) {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }

        for dir_path in &self.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }

        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/home/alice/.ssh/id_rsa.pub", "ssh-rsa AAAA alice\n");

        assert!(fs.exists(Path::new("/home/alice/.ssh/id_rsa.pub")));
        assert!(fs.exists(Path::new("/home/alice/.ssh")));
        assert!(fs.exists(Path::new("/home")));

        let content = fs
            .read_to_string(Path::new("/home/alice/.ssh/id_rsa.pub"))
            .unwrap();
        assert_eq!(content, "ssh-rsa AAAA alice\n");
    }

    #[test]
    fn test_mock_fs_read_dir() {
        let mut fs = MockFs::new();
        fs.add_file("/etc/facter/facts.d/users.yaml", "---\n");
        fs.add_file("/etc/facter/facts.d/site.json", "{}");
        fs.add_unreadable_file("/etc/facter/facts.d/secret.txt");
        fs.add_dir("/etc/facter/facts.d/nested");

        let entries = fs.read_dir(Path::new("/etc/facter/facts.d")).unwrap();
        assert_eq!(entries.len(), 4);

        let etc = fs.read_dir(Path::new("/etc")).unwrap();
        assert_eq!(etc, vec![PathBuf::from("/etc/facter")]);
    }

    #[test]
    fn test_mock_fs_add_user() {
        let mut fs = MockFs::new();
        fs.add_user("root", 0, "/root");
        fs.add_user("alice", 1000, "/home/alice");

        let passwd = fs.read_to_string(Path::new(MOCK_PASSWD_PATH)).unwrap();
        assert_eq!(
            passwd,
            "root:x:0:0:root:/root:/bin/bash\nalice:x:1000:1000:alice:/home/alice:/bin/bash\n"
        );
        assert!(fs.exists(Path::new("/home/alice")));
    }

    #[test]
    fn test_mock_fs_unreadable() {
        let mut fs = MockFs::new();
        fs.add_unreadable_file("/home/bob/.ssh/id_rsa.pub");

        assert!(fs.exists(Path::new("/home/bob/.ssh/id_rsa.pub")));
        let err = fs
            .read_to_string(Path::new("/home/bob/.ssh/id_rsa.pub"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let result = fs.read_to_string(Path::new("/nonexistent"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
        assert!(fs.read_dir(Path::new("/nonexistent")).is_err());
    }
}
