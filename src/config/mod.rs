use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Transcript tool settings
    pub transcript: TranscriptConfig,

    /// Backup tool settings
    pub backup: BackupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Preferred caption language code (first available track if not found)
    pub language: String,

    /// Assumed speaking rate for the duration estimate
    pub words_per_minute: usize,

    /// Gemini model used for summarization
    pub summary_model: String,

    /// Character cap on transcript text sent for summarization
    pub summary_char_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Directory that gets archived
    pub source_dir: PathBuf,

    /// Directory archives are written to
    pub backup_dir: PathBuf,

    /// Glob patterns passed to tar as --exclude
    pub excludes: Vec<String>,

    /// Number of archives to retain after pruning
    pub keep: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcript: TranscriptConfig {
                language: "en".to_string(),
                words_per_minute: 150,
                summary_model: "gemini-1.5-flash".to_string(),
                summary_char_limit: 30_000,
            },
            backup: BackupConfig {
                source_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
                backup_dir: PathBuf::from("/mnt/backup/home"),
                excludes: vec![
                    ".cache".to_string(),
                    "Downloads".to_string(),
                    ".local/share/Trash".to_string(),
                    ".cargo/registry".to_string(),
                    "node_modules".to_string(),
                    "*.tmp".to_string(),
                ],
                keep: 5,
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("homeutils").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.transcript.words_per_minute == 0 {
            anyhow::bail!("transcript.words_per_minute must be at least 1");
        }

        if self.backup.keep == 0 {
            anyhow::bail!("backup.keep must be at least 1");
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Caption language: {}", self.transcript.language);
        println!("  Words per minute: {}", self.transcript.words_per_minute);
        println!("  Summary model: {}", self.transcript.summary_model);
        println!("  Backup source: {}", self.backup.source_dir.display());
        println!("  Backup directory: {}", self.backup.backup_dir.display());
        println!("  Archives kept: {}", self.backup.keep);
    }
}
