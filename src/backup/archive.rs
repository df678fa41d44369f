use chrono::NaiveDate;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::{HomeutilsError, Result};

/// Archive name for a given date. One archive per day; running twice on the
/// same date targets the same file.
pub fn archive_filename(date: NaiveDate) -> String {
    format!("home_backup_{}.tar.gz", date.format("%Y-%m-%d"))
}

/// Split a source directory into tar's working directory and member name.
///
/// Archiving `/home/user` runs `tar -C /home user` so the archive contains a
/// single `user/` tree rather than absolute paths. A source with no parent
/// (the filesystem root) is archived as `.` from within itself.
fn tar_target(source: &Path) -> (&Path, &OsStr) {
    match (source.parent(), source.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => (parent, name),
        _ => (source, OsStr::new(".")),
    }
}

/// Create a compressed archive of `source` at `target`, excluding the given
/// glob patterns. Failure carries tar's stderr and exit code and is fatal to
/// the backup run.
pub async fn create_archive(source: &Path, target: &Path, excludes: &[String]) -> Result<()> {
    let (workdir, member) = tar_target(source);

    let mut command = Command::new("tar");
    command.arg("-czf").arg(target);
    for pattern in excludes {
        command.arg(format!("--exclude={pattern}"));
    }
    command.arg("-C").arg(workdir).arg(member);

    tracing::debug!("Running: {:?}", command);

    let output = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| HomeutilsError::ArchiveError {
            message: format!("could not start tar: {e}"),
            code: None,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(HomeutilsError::ArchiveError {
            message: format!("tar exited with {}: {}", output.status, stderr.trim()),
            code: output.status.code(),
        }
        .into());
    }

    Ok(())
}
