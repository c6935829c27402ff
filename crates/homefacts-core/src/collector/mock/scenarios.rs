//! Pre-built mock host scenarios for testing.

use super::filesystem::{MOCK_PASSWD_PATH, MockFs};

/// RSA key stored for `alice` in [`MockFs::typical_host`].
pub const ALICE_RSA_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQC7alice alice@workstation\n";
/// DSA key stored for `bob` in [`MockFs::typical_host`].
pub const BOB_DSA_KEY: &str = "ssh-dss AAAAB3NzaC1kc3MAAACBAP9bob bob@legacy\n";

impl MockFs {
    /// Creates a typical host with a handful of accounts.
    ///
    /// - `root` (`/root`): no key files
    /// - `daemon`, `nobody`: system accounts without homes on disk
    /// - `alice` (`/home/alice`): `id_rsa.pub` and `id_dsa.pub`
    /// - `bob` (`/home/bob`): `id_dsa.pub` only
    /// - `carol` (`/home/carol/`): trailing slash in home, `.ssh` without keys
    pub fn typical_host() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            MOCK_PASSWD_PATH,
            "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin
alice:x:1000:1000:Alice:/home/alice:/bin/bash
bob:x:1001:1001:Bob:/home/bob:/bin/zsh
carol:x:1002:1002:Carol:/home/carol/:/bin/bash
",
        );
        fs.add_dir("/root");
        fs.add_dir("/usr/sbin");

        fs.add_ssh_key("/home/alice", "id_rsa.pub", ALICE_RSA_KEY);
        fs.add_ssh_key(
            "/home/alice",
            "id_dsa.pub",
            "ssh-dss AAAAB3NzaC1kc3MAAACBAP9alice alice@old\n",
        );
        fs.add_ssh_key("/home/bob", "id_dsa.pub", BOB_DSA_KEY);
        fs.add_dir("/home/carol/.ssh");
        fs.add_file("/home/carol/.ssh/authorized_keys", "ssh-ed25519 AAAAC3Nza carol\n");

        fs
    }
}
