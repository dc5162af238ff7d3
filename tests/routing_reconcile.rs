use std::fs;
use std::path::{Path, PathBuf};

use gh_switcher::config::{Profile, ProfileSet};
use gh_switcher::routing::{self, Skipped};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    fn key(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, "private key").expect("write key");
        path.display().to_string()
    }

    fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read file")
    }
}

fn profile(username: &str, key_reference: &str) -> Profile {
    Profile {
        display_name: username.to_string(),
        email: format!("{username}@example.com"),
        username: username.to_string(),
        key_reference: key_reference.to_string(),
    }
}

fn block(username: &str, key: &str) -> String {
    format!(
        "# GitHub account: {username}\nHost github.com-{username}\n    HostName github.com\n    User git\n    IdentityFile {key}\n    IdentitiesOnly yes\n\n"
    )
}

#[test]
fn creates_file_from_single_profile_without_backup() {
    let fx = Fixture::new();
    let key = fx.key("k");
    let mut profiles = ProfileSet::new();
    profiles.insert("work".to_string(), profile("alice", &key));

    let report = routing::reconcile(&profiles, &fx.config()).expect("reconcile");

    assert_eq!(fx.read(&fx.config()), block("alice", &key));
    assert!(!routing::backup_path(&fx.config()).exists());
    assert!(report.backup.is_none());
    assert_eq!(report.included, ["work"]);
}

#[test]
fn second_run_is_byte_identical() {
    let fx = Fixture::new();
    fs::write(
        fx.config(),
        "Host personal-box\n    HostName 10.0.0.2\n# trailing note",
    )
    .expect("seed");
    let mut profiles = ProfileSet::new();
    profiles.insert("work".to_string(), profile("alice", &fx.key("ka")));
    profiles.insert("home".to_string(), profile("al", &fx.key("kb")));

    routing::reconcile(&profiles, &fx.config()).expect("first run");
    let first = fx.read(&fx.config());
    routing::reconcile(&profiles, &fx.config()).expect("second run");
    let second = fx.read(&fx.config());

    assert_eq!(first, second);
    assert_eq!(first.matches("# GitHub account:").count(), 2);
}

#[test]
fn stale_block_is_removed_and_foreign_lines_kept_in_order() {
    let fx = Fixture::new();
    let seeded = format!("L1\n{}L2\n", block("old", "/keys/old"));
    fs::write(fx.config(), &seeded).expect("seed");

    let report = routing::reconcile(&ProfileSet::new(), &fx.config()).expect("reconcile");

    assert_eq!(fx.read(&fx.config()), "L1\nL2\n\n");
    assert_eq!(report.removed_blocks, 1);
}

#[test]
fn missing_key_is_skipped_while_others_are_written() {
    let fx = Fixture::new();
    let good = fx.key("good");
    let missing = fx.dir.path().join("nope").display().to_string();
    let mut profiles = ProfileSet::new();
    profiles.insert("a-good".to_string(), profile("good", &good));
    profiles.insert("b-missing".to_string(), profile("gone", &missing));

    let report = routing::reconcile(&profiles, &fx.config()).expect("reconcile");

    let content = fx.read(&fx.config());
    assert_eq!(content, block("good", &good));
    assert!(!content.contains("gone"));
    assert_eq!(
        report.skipped,
        [Skipped::MissingKey {
            alias: "b-missing".to_string(),
            path: missing,
        }]
    );
}

#[test]
fn backup_holds_original_bytes() {
    let fx = Fixture::new();
    fs::write(fx.config(), "foo\n").expect("seed");
    let mut profiles = ProfileSet::new();
    profiles.insert("work".to_string(), profile("alice", &fx.key("k")));

    let report = routing::reconcile(&profiles, &fx.config()).expect("reconcile");

    let backup = routing::backup_path(&fx.config());
    assert_eq!(fx.read(&backup), "foo\n");
    assert_eq!(report.backup.as_deref(), Some(backup.as_path()));
    assert!(fx.read(&fx.config()).starts_with("foo\n\n# GitHub account: alice\n"));
}

#[test]
fn backup_is_overwritten_each_run() {
    let fx = Fixture::new();
    fs::write(fx.config(), "first\n").expect("seed");
    routing::reconcile(&ProfileSet::new(), &fx.config()).expect("first run");
    routing::reconcile(&ProfileSet::new(), &fx.config()).expect("second run");

    assert_eq!(fx.read(&routing::backup_path(&fx.config())), "first\n\n");
}

#[test]
fn no_temp_files_left_behind() {
    let fx = Fixture::new();
    let mut profiles = ProfileSet::new();
    profiles.insert("work".to_string(), profile("alice", &fx.key("k")));
    routing::reconcile(&profiles, &fx.config()).expect("reconcile");

    let leftovers: Vec<_> = fs::read_dir(fx.dir.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn creates_missing_parent_directory() {
    let fx = Fixture::new();
    let target = fx.dir.path().join(".ssh").join("config");
    routing::reconcile(&ProfileSet::new(), &target).expect("reconcile");
    assert_eq!(fx.read(&target), "");
}

#[test]
fn line_break_in_username_cannot_grow_the_file() {
    let fx = Fixture::new();
    let key = fx.key("k");
    let mut profiles = ProfileSet::new();
    profiles.insert("injected".to_string(), profile("bob\nMatch all", &key));
    profiles.insert("work".to_string(), profile("alice", &key));

    let report = routing::reconcile(&profiles, &fx.config()).expect("first run");
    let first = fx.read(&fx.config());
    routing::reconcile(&profiles, &fx.config()).expect("second run");
    let second = fx.read(&fx.config());

    assert_eq!(first, second);
    assert_eq!(first, block("alice", &key));
    assert!(!first.contains("Match all"));
    assert_eq!(
        report.skipped,
        [Skipped::InvalidUsername {
            alias: "injected".to_string(),
            problem: "contains control characters",
        }]
    );
}

#[test]
fn line_break_in_key_path_is_skipped() {
    let fx = Fixture::new();
    let mut profiles = ProfileSet::new();
    profiles.insert(
        "work".to_string(),
        profile("alice", "/keys/id\n    ProxyCommand evil"),
    );

    let report = routing::reconcile(&profiles, &fx.config()).expect("reconcile");

    assert_eq!(fx.read(&fx.config()), "");
    assert_eq!(
        report.skipped,
        [Skipped::InvalidKeyPath {
            alias: "work".to_string(),
            problem: "contains control characters",
        }]
    );
}

#[test]
fn non_utf8_foreign_bytes_survive_reconciliation() {
    let fx = Fixture::new();
    let original: &[u8] = b"# caf\xe9 server\nHost box\n    User me\n";
    fs::write(fx.config(), original).expect("seed");
    let key = fx.key("k");
    let mut profiles = ProfileSet::new();
    profiles.insert("work".to_string(), profile("alice", &key));

    routing::reconcile(&profiles, &fx.config()).expect("first run");
    let first = fs::read(fx.config()).expect("read");
    routing::reconcile(&profiles, &fx.config()).expect("second run");

    let mut expected = original.to_vec();
    expected.push(b'\n');
    expected.extend_from_slice(block("alice", &key).as_bytes());
    assert_eq!(first, expected);
    assert_eq!(fs::read(fx.config()).expect("read"), first);
    assert_eq!(
        fs::read(routing::backup_path(&fx.config())).expect("backup"),
        first
    );
}
