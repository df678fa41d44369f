use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::BackupCli;
use crate::config::Config;
use crate::utils;
use crate::HomeutilsError;

pub mod archive;
pub mod retention;

pub use archive::archive_filename;
pub use retention::{list_archives, prune_archives};

/// Settings for one backup run, config defaults merged with CLI overrides
#[derive(Debug, Clone)]
pub struct BackupRun {
    pub source_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub excludes: Vec<String>,
    pub keep: usize,
    pub force: bool,
}

impl BackupRun {
    /// Merge CLI overrides over config defaults.
    ///
    /// The retention count gets the same check as the config file value: a
    /// keep of 0 would prune every archive, including the one this run is
    /// about to write.
    pub fn from_cli(cli: &BackupCli, config: &Config) -> Result<Self> {
        let keep = cli.keep.unwrap_or(config.backup.keep);
        if keep == 0 {
            return Err(HomeutilsError::InvalidInput(
                "--keep must be at least 1, refusing to prune every archive".to_string(),
            )
            .into());
        }

        Ok(Self {
            source_dir: cli
                .source
                .clone()
                .unwrap_or_else(|| config.backup.source_dir.clone()),
            backup_dir: cli
                .backup_dir
                .clone()
                .unwrap_or_else(|| config.backup.backup_dir.clone()),
            excludes: config.backup.excludes.clone(),
            keep,
            force: cli.force,
        })
    }

    /// Execute the backup sequence: derive the dated target, create the
    /// archive (after an overwrite check), report its size, list recent
    /// archives, and prune old ones. Declining the overwrite prompt ends the
    /// run successfully without touching anything.
    pub async fn execute(&self) -> Result<()> {
        let today = chrono::Local::now().date_naive();
        let target = self.backup_dir.join(archive_filename(today));

        fs_err::create_dir_all(&self.backup_dir)
            .context("Failed to create backup directory")?;

        if target.exists() && !self.force {
            if !confirm_overwrite(&target)? {
                println!("Keeping existing archive, nothing to do.");
                return Ok(());
            }
        }

        if !utils::check_command_available("tar").await {
            return Err(HomeutilsError::ArchiveError {
                message: "tar is not available in PATH".to_string(),
                code: None,
            }
            .into());
        }

        tracing::info!(
            "Archiving {} to {}",
            self.source_dir.display(),
            target.display()
        );

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("static template is valid"),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress.set_message("Creating archive...");

        let result = archive::create_archive(&self.source_dir, &target, &self.excludes).await;
        progress.finish_and_clear();
        result?;

        // The archive is on disk; everything past this point is reporting and
        // housekeeping, so failures are warnings rather than a non-zero exit.
        match fs_err::metadata(&target) {
            Ok(metadata) => println!(
                "Archive created: {} ({})",
                target.display(),
                utils::format_file_size(metadata.len())
            ),
            Err(e) => {
                tracing::warn!("Could not read size of fresh archive: {}", e);
                println!("Archive created: {}", target.display());
            }
        }

        match list_archives(&self.backup_dir) {
            Ok(archives) => {
                println!("\nRecent archives:");
                for entry in archives.iter().take(self.keep) {
                    println!(
                        "  {}  {:>10}  {}",
                        utils::format_timestamp(entry.modified),
                        utils::format_file_size(entry.size),
                        entry.path.display()
                    );
                }
            }
            Err(e) => {
                tracing::warn!("Could not list backup directory: {}", e);
                println!("\nCould not list recent archives: {e}");
            }
        }

        match prune_archives(&self.backup_dir, self.keep) {
            Ok(removed) if !removed.is_empty() => {
                println!("\nPruned {} old archive(s).", removed.len());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Could not prune old archives: {}", e);
                println!("\nCould not prune old archives: {e}");
            }
        }

        Ok(())
    }
}

/// Ask on stdin whether an existing same-day archive should be replaced
fn confirm_overwrite(target: &std::path::Path) -> Result<bool> {
    print!("{} already exists. Overwrite? [y/N] ", target.display());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(parse_confirmation(&answer))
}

/// Only an explicit yes counts; everything else declines
fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
