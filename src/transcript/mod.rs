use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::output;

pub mod fetch;
pub mod stats;
pub mod summarize;
pub mod url;

pub use stats::TranscriptStats;
pub use url::extract_video_id;

/// Everything produced by one run of the transcript tool
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptDigest {
    /// The 11-character video identifier
    pub video_id: String,

    /// URL (or bare ID) as given on the command line
    pub source_url: String,

    /// Full transcript text, caption segments joined with spaces
    pub transcript: String,

    /// Word/character/duration statistics
    pub stats: TranscriptStats,

    /// Where the raw transcript was written
    pub output_path: PathBuf,

    /// AI summary, when a key was available and the request succeeded
    pub summary: Option<String>,
}

/// Fetch-stats-save-summarize pipeline for a single video
pub struct TranscriptPipeline {
    config: Config,
    client: reqwest::Client,
}

impl TranscriptPipeline {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { config, client })
    }

    /// Run the full pipeline.
    ///
    /// Identifier extraction and transcript fetch failures are fatal; a
    /// summarization failure only logs a warning because the transcript has
    /// already been saved.
    pub async fn run(
        &self,
        input: &str,
        output_override: Option<PathBuf>,
        api_key: Option<&str>,
        skip_summary: bool,
    ) -> Result<TranscriptDigest> {
        let video_id = extract_video_id(input)?;
        tracing::info!("Video ID: {}", video_id);

        let progress = spinner("Fetching transcript...");
        let transcript = fetch::fetch_transcript(
            &self.client,
            &video_id,
            &self.config.transcript.language,
        )
        .await;
        progress.finish_and_clear();
        let transcript = transcript?;

        let stats = stats::compute_stats(&transcript, self.config.transcript.words_per_minute);

        let output_path = output_override
            .unwrap_or_else(|| PathBuf::from(format!("transcript_{video_id}.txt")));
        output::save_transcript(&output_path, &video_id, input, &stats, &transcript)?;

        let summary = if skip_summary {
            None
        } else if let Some(key) = api_key {
            let progress = spinner("Summarizing with Gemini...");
            let result = summarize::summarize(
                &self.client,
                key,
                &self.config.transcript.summary_model,
                &transcript,
                self.config.transcript.summary_char_limit,
            )
            .await;
            progress.finish_and_clear();

            match result {
                Ok(summary) => Some(summary),
                Err(e) => {
                    // Best effort only; the saved transcript is the real artifact
                    tracing::warn!("Summarization failed: {:#}", e);
                    eprintln!("Summarization failed ({e:#}); transcript was still saved.");
                    None
                }
            }
        } else {
            tracing::debug!("No API key set, skipping summarization");
            None
        };

        Ok(TranscriptDigest {
            video_id,
            source_url: input.to_string(),
            transcript,
            stats,
            output_path,
            summary,
        })
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("static template is valid"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_message(message);
    progress
}
