use anyhow::{Context, Result};
use serde::Deserialize;

use crate::HomeutilsError;

/// Browser-like user agent; YouTube serves a stripped page to unknown clients
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

/// One caption track advertised by the watch page's player response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(default)]
    segs: Vec<TimedTextSegment>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// Fetch the full transcript text for a video.
///
/// Downloads the watch page, discovers the available caption tracks, picks the
/// preferred language (first track as fallback), and pulls the track in json3
/// format. All failures map to [`HomeutilsError::FetchError`].
pub async fn fetch_transcript(
    client: &reqwest::Client,
    video_id: &str,
    preferred_language: &str,
) -> Result<String> {
    let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
    tracing::debug!("Fetching watch page: {}", watch_url);

    let page = get_text(client, &watch_url).await?;

    let tracks = parse_caption_tracks(&page)?;
    let track = select_track(&tracks, preferred_language)
        .ok_or_else(|| HomeutilsError::FetchError("no caption tracks found".to_string()))?;

    tracing::info!(
        "Using caption track: {} ({})",
        track.language_code,
        track.kind.as_deref().unwrap_or("manual")
    );

    let track_url = format!("{}&fmt=json3", track.base_url);
    let body = get_text(client, &track_url).await?;

    parse_timedtext(&body)
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| HomeutilsError::FetchError(format!("request to {url} failed: {e}")))?;

    if !response.status().is_success() {
        return Err(
            HomeutilsError::FetchError(format!("HTTP {} from {url}", response.status())).into(),
        );
    }

    response
        .text()
        .await
        .map_err(|e| HomeutilsError::FetchError(format!("failed to read response body: {e}")).into())
}

/// Locate the `captionTracks` array embedded in the watch page HTML.
///
/// The player response is a large inline JSON blob; rather than parse all of
/// it, deserialize just the array starting at the marker. Videos with captions
/// disabled have no marker at all.
pub fn parse_caption_tracks(page: &str) -> Result<Vec<CaptionTrack>> {
    const MARKER: &str = "\"captionTracks\":";

    let start = page.find(MARKER).ok_or_else(|| {
        HomeutilsError::FetchError(
            "no transcript available (captions disabled or video not found)".to_string(),
        )
    })?;

    let array = &page[start + MARKER.len()..];

    // A stream deserializer stops cleanly at the end of the first JSON value,
    // so the trailing player-response content is ignored.
    let mut stream = serde_json::Deserializer::from_str(array).into_iter::<Vec<CaptionTrack>>();
    let tracks = stream
        .next()
        .transpose()
        .context("malformed captionTracks JSON in watch page")?
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(HomeutilsError::FetchError("no caption tracks found".to_string()).into());
    }

    Ok(tracks)
}

/// Pick the track matching the preferred language, else the first one
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    preferred_language: &str,
) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == preferred_language)
        .or_else(|| {
            tracks
                .iter()
                .find(|t| t.language_code.starts_with(preferred_language))
        })
        .or_else(|| tracks.first())
}

/// Flatten a json3 timedtext document into a single text blob.
///
/// Events arrive in playback order; segments are joined with spaces and
/// whitespace-only segments (newline markers) are dropped.
pub fn parse_timedtext(body: &str) -> Result<String> {
    let timedtext: TimedText =
        serde_json::from_str(body).context("malformed timedtext JSON")?;

    let words: Vec<&str> = timedtext
        .events
        .iter()
        .flat_map(|event| event.segs.iter())
        .flat_map(|seg| seg.utf8.split_whitespace())
        .collect();

    if words.is_empty() {
        return Err(HomeutilsError::FetchError("transcript is empty".to_string()).into());
    }

    Ok(words.join(" "))
}
