use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "yt-digest",
    about = "Fetch a YouTube video transcript, report stats, and optionally summarize it with Gemini",
    version,
    long_about = "Fetches the caption transcript for a YouTube video, prints word/duration \
statistics, saves the raw text to a file, and (when a Gemini API key is available) prints an \
AI-generated summary with key points."
)]
pub struct TranscriptCli {
    /// YouTube URL or bare 11-character video ID
    #[arg(value_name = "URL_OR_ID")]
    pub url: String,

    /// Output file path (defaults to transcript_<video_id>.txt)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip AI summarization even if an API key is set
    #[arg(long)]
    pub no_summary: bool,

    /// Gemini API key (usually set via the environment)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Parser)]
#[command(
    name = "home-backup",
    about = "Archive the home directory to the backup drive and prune old archives",
    version,
    long_about = "Creates a dated .tar.gz of the home directory in the backup directory, \
excluding caches and other noise, then keeps only the most recent archives. Prompts before \
overwriting an archive made earlier the same day unless --force is given."
)]
pub struct BackupCli {
    /// Overwrite an existing same-day archive without prompting
    #[arg(short, long)]
    pub force: bool,

    /// Directory to back up (defaults to the configured source, normally $HOME)
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Where archives are written (defaults to the configured backup directory)
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// How many archives to retain after pruning
    #[arg(long, value_name = "COUNT")]
    pub keep: Option<usize>,
}
