use anyhow::Result;
use std::path::Path;

use crate::transcript::{TranscriptDigest, TranscriptStats};
use crate::HomeutilsError;

/// How much raw transcript to show on the console when no summary was made
const PREVIEW_CHARS: usize = 2000;

/// Write the raw transcript to disk with a small metadata header
pub fn save_transcript(
    path: &Path,
    video_id: &str,
    source_url: &str,
    stats: &TranscriptStats,
    transcript: &str,
) -> Result<()> {
    let content = format!(
        "Video ID: {video_id}\n\
         URL: {source_url}\n\
         Word count: {}\n\
         {}\n\n\
         {transcript}",
        stats.word_count,
        "=".repeat(60),
    );

    fs_err::write(path, content).map_err(|e| {
        HomeutilsError::WriteError(format!("could not write {}: {e}", path.display()))
    })?;

    Ok(())
}

/// Print the digest to the console: stats, then the summary when one was
/// produced, else a short raw-transcript preview.
pub fn print_report(digest: &TranscriptDigest) {
    let rule = "=".repeat(60);

    println!("\n{rule}");
    println!("BASIC STATS");
    println!("{rule}");
    println!("Word count: {}", digest.stats.word_count);
    println!("Character count: {}", digest.stats.char_count);
    println!("Estimated duration: ~{} minutes", digest.stats.estimated_minutes);

    match &digest.summary {
        Some(summary) => {
            println!("\n{rule}");
            println!("AI ANALYSIS (Gemini)");
            println!("{rule}");
            println!("{summary}");
        }
        None => {
            println!("\n{rule}");
            println!("RAW TRANSCRIPT (first {PREVIEW_CHARS} chars)");
            println!("{rule}");
            println!("{}", preview(&digest.transcript));
        }
    }

    println!("\nTranscript saved to: {}", digest.output_path.display());
}

fn preview(transcript: &str) -> String {
    if transcript.chars().count() <= PREVIEW_CHARS {
        return transcript.to_string();
    }

    let truncated: String = transcript.chars().take(PREVIEW_CHARS).collect();
    format!("{truncated}...")
}
