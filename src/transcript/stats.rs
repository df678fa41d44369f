use serde::Serialize;

/// Basic statistics derived from a transcript blob
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptStats {
    pub word_count: usize,
    pub char_count: usize,
    pub estimated_minutes: usize,
}

/// Compute word count, character count, and an estimated duration from an
/// assumed speaking rate. Integer division keeps the estimate monotonic in
/// the word count.
pub fn compute_stats(transcript: &str, words_per_minute: usize) -> TranscriptStats {
    let word_count = transcript.split_whitespace().count();

    TranscriptStats {
        word_count,
        char_count: transcript.chars().count(),
        estimated_minutes: word_count / words_per_minute.max(1),
    }
}
