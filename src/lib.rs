//! homeutils - two small personal CLI utilities
//!
//! `yt-digest` fetches the caption transcript of a YouTube video, reports basic
//! statistics, saves the text locally, and optionally summarizes it with the
//! Gemini API. `home-backup` archives a home directory to a backup drive and
//! prunes old archives. The two tools are independent; they share only the
//! error type, configuration, and formatting helpers in this library.

pub mod backup;
pub mod cli;
pub mod config;
pub mod output;
pub mod transcript;
pub mod utils;

pub use cli::{BackupCli, TranscriptCli};
pub use config::Config;
pub use transcript::{TranscriptDigest, TranscriptPipeline};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types shared by both utilities
#[derive(thiserror::Error, Debug)]
pub enum HomeutilsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcript fetch failed: {0}")]
    FetchError(String),

    #[error("File write failed: {0}")]
    WriteError(String),

    #[error("Archive creation failed: {message}")]
    ArchiveError {
        message: String,
        /// Exit code of the external tar process, if it ran at all
        code: Option<i32>,
    },
}

impl HomeutilsError {
    /// Exit code the binaries should report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HomeutilsError::ArchiveError { code: Some(code), .. } => *code,
            _ => 1,
        }
    }
}
