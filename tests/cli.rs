use assert_cmd::Command;
use predicates::prelude::*;

use homeutils::backup::archive_filename;

/// Run a binary with config and cwd isolated to a scratch directory
fn isolated_cmd(bin: &str, dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin(bin).expect("binary builds");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("GEMINI_API_KEY");
    cmd
}

#[test]
fn yt_digest_rejects_malformed_url_without_network() {
    let dir = tempfile::tempdir().unwrap();

    isolated_cmd("yt-digest", dir.path())
        .arg("definitely-not-a-video")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("definitely-not-a-video"));

    // No transcript file may appear for rejected input
    let leftovers = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("transcript_"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn yt_digest_requires_an_argument() {
    let dir = tempfile::tempdir().unwrap();

    isolated_cmd("yt-digest", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn home_backup_creates_dated_archive() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("homedir");
    let backups = dir.path().join("backups");
    std::fs::create_dir(&source).unwrap();
    std::fs::write(source.join("notes.txt"), "important").unwrap();

    isolated_cmd("home-backup", dir.path())
        .arg("--force")
        .arg("--source")
        .arg(&source)
        .arg("--backup-dir")
        .arg(&backups)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    let expected = backups.join(archive_filename(chrono::Local::now().date_naive()));
    assert!(expected.exists(), "missing {}", expected.display());
    assert!(std::fs::metadata(&expected).unwrap().len() > 0);
}

#[test]
fn home_backup_declined_prompt_leaves_archive_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("homedir");
    let backups = dir.path().join("backups");
    std::fs::create_dir(&source).unwrap();
    std::fs::write(source.join("notes.txt"), "first run").unwrap();

    isolated_cmd("home-backup", dir.path())
        .arg("--force")
        .arg("--source")
        .arg(&source)
        .arg("--backup-dir")
        .arg(&backups)
        .assert()
        .success();

    let target = backups.join(archive_filename(chrono::Local::now().date_naive()));
    let original = std::fs::read(&target).unwrap();

    // Change the source, rerun, and answer "n" at the prompt
    std::fs::write(source.join("notes.txt"), "second run, should not land").unwrap();

    isolated_cmd("home-backup", dir.path())
        .arg("--source")
        .arg(&source)
        .arg("--backup-dir")
        .arg(&backups)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));

    // Exactly one archive for the date, byte-for-byte unchanged
    let archives: Vec<_> = std::fs::read_dir(&backups)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tar.gz"))
        .collect();
    assert_eq!(archives.len(), 1);
    assert_eq!(std::fs::read(&target).unwrap(), original);
}

#[test]
fn home_backup_rejects_zero_retention() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("homedir");
    let backups = dir.path().join("backups");
    std::fs::create_dir(&source).unwrap();
    std::fs::create_dir(&backups).unwrap();
    std::fs::write(source.join("notes.txt"), "data").unwrap();
    std::fs::write(backups.join("old_0.tar.gz"), b"stale").unwrap();

    isolated_cmd("home-backup", dir.path())
        .arg("--force")
        .arg("--keep")
        .arg("0")
        .arg("--source")
        .arg(&source)
        .arg("--backup-dir")
        .arg(&backups)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));

    // Nothing may be pruned by a rejected run
    let archives = std::fs::read_dir(&backups)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tar.gz"))
        .count();
    assert_eq!(archives, 1);
}

#[cfg(unix)]
#[test]
fn home_backup_succeeds_when_backup_dir_cannot_be_listed() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("homedir");
    let backups = dir.path().join("backups");
    std::fs::create_dir(&source).unwrap();
    std::fs::create_dir(&backups).unwrap();
    std::fs::write(source.join("notes.txt"), "data").unwrap();

    // Write+traverse but no read: the archive can land, listing cannot.
    // (No effect when running as root, where the run succeeds anyway.)
    std::fs::set_permissions(&backups, std::fs::Permissions::from_mode(0o311)).unwrap();

    isolated_cmd("home-backup", dir.path())
        .arg("--force")
        .arg("--source")
        .arg(&source)
        .arg("--backup-dir")
        .arg(&backups)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    std::fs::set_permissions(&backups, std::fs::Permissions::from_mode(0o755)).unwrap();
    let target = backups.join(archive_filename(chrono::Local::now().date_naive()));
    assert!(target.exists());
}

#[test]
fn home_backup_prunes_to_keep_count() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("homedir");
    let backups = dir.path().join("backups");
    std::fs::create_dir(&source).unwrap();
    std::fs::create_dir(&backups).unwrap();
    std::fs::write(source.join("notes.txt"), "data").unwrap();

    // Pre-existing older archives, created before today's run
    for i in 0..6 {
        std::fs::write(backups.join(format!("old_{i}.tar.gz")), b"stale").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
    }

    isolated_cmd("home-backup", dir.path())
        .arg("--force")
        .arg("--keep")
        .arg("3")
        .arg("--source")
        .arg(&source)
        .arg("--backup-dir")
        .arg(&backups)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pruned"));

    let mut remaining: Vec<_> = std::fs::read_dir(&backups)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tar.gz"))
        .collect();
    remaining.sort();

    // min(keep, total): the fresh archive plus the two newest old ones
    assert_eq!(remaining.len(), 3);
    assert!(remaining.contains(&archive_filename(chrono::Local::now().date_naive())));
    assert!(remaining.contains(&"old_4.tar.gz".to_string()));
    assert!(remaining.contains(&"old_5.tar.gz".to_string()));
}
