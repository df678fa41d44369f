use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One archive found in the backup directory
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

/// List all `.tar.gz` files in the backup directory, newest first by
/// modification time. Ordering never looks at the filename.
pub fn list_archives(backup_dir: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();

    for entry in fs_err::read_dir(backup_dir).context("Failed to read backup directory")? {
        let entry = entry?;
        let path = entry.path();

        let is_archive = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".tar.gz"));
        if !is_archive {
            continue;
        }

        let metadata = entry.metadata()?;
        entries.push(ArchiveEntry {
            path,
            size: metadata.len(),
            modified: metadata.modified()?,
        });
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(entries)
}

/// Delete every archive beyond the `keep` most recent ones.
///
/// Returns the paths that were removed. A file that cannot be deleted is
/// logged and skipped; the archive just written is never among the victims,
/// so pruning failures do not fail the backup.
pub fn prune_archives(backup_dir: &Path, keep: usize) -> Result<Vec<PathBuf>> {
    let archives = list_archives(backup_dir)?;
    let mut removed = Vec::new();

    for entry in archives.iter().skip(keep) {
        match fs_err::remove_file(&entry.path) {
            Ok(()) => {
                tracing::info!("Pruned old archive: {}", entry.path.display());
                removed.push(entry.path.clone());
            }
            Err(e) => {
                tracing::warn!("Could not prune {}: {}", entry.path.display(), e);
            }
        }
    }

    Ok(removed)
}
