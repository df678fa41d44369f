use url::Url;

use crate::HomeutilsError;

/// Length of every YouTube video identifier
const VIDEO_ID_LEN: usize = 11;

/// Check whether a string is a well-formed video identifier
fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Extract the video identifier from a YouTube URL or bare ID.
///
/// Supported shapes: `youtube.com/watch?v=ID` (extra query parameters
/// ignored), `youtu.be/ID`, `youtube.com/embed/ID`, `youtube.com/shorts/ID`,
/// `youtube.com/v/ID`, and the identifier on its own. This is a pure string
/// operation; no network request is made.
pub fn extract_video_id(input: &str) -> Result<String, HomeutilsError> {
    let input = input.trim();

    // Maybe it's just the video ID itself
    if is_video_id(input) {
        return Ok(input.to_string());
    }

    // Accept URLs written without a scheme
    let parsed = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{input}")))
        .map_err(|_| invalid(input))?;

    let host = parsed.host_str().ok_or_else(|| invalid(input))?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    match host {
        "youtu.be" => {
            let id = parsed
                .path_segments()
                .and_then(|mut segments| segments.next())
                .ok_or_else(|| invalid(input))?;
            if is_video_id(id) {
                return Ok(id.to_string());
            }
        }
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => {
            // Standard watch URL carries the ID in the query string
            if parsed.path() == "/watch" {
                if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "v") {
                    if is_video_id(&id) {
                        return Ok(id.into_owned());
                    }
                }
            }

            // Embed, shorts, and legacy /v/ URLs carry it in the path
            let mut segments = parsed.path_segments().ok_or_else(|| invalid(input))?;
            if let (Some(kind), Some(id)) = (segments.next(), segments.next()) {
                if matches!(kind, "embed" | "shorts" | "v" | "live") && is_video_id(id) {
                    return Ok(id.to_string());
                }
            }
        }
        _ => {}
    }

    Err(invalid(input))
}

fn invalid(input: &str) -> HomeutilsError {
    HomeutilsError::InvalidInput(format!("could not extract a video ID from: {input}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123XYZ-_").unwrap(),
            "abc123XYZ-_"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/abc123XYZ-_").unwrap(),
            "abc123XYZ-_"
        );
    }

    #[test]
    fn test_embed_and_shorts_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_equivalent_urls_yield_same_id() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&list=PLx&t=42",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=30",
            "youtu.be/dQw4w9WgXcQ",
        ];
        for url in urls {
            assert_eq!(extract_video_id(url).unwrap(), "dQw4w9WgXcQ", "url: {url}");
        }
    }

    #[test]
    fn test_bare_id_accepted() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_malformed_inputs_rejected() {
        let inputs = [
            "",
            "not-a-url",
            "https://vimeo.com/123456789",
            "https://www.youtube.com/playlist?list=PLx",
            "https://www.youtube.com/watch?v=tooshort",
            "https://www.youtube.com/watch?v=waytoolongid42",
            "https://youtu.be/",
            "dQw4w9WgXc!", // bad character
        ];
        for input in inputs {
            let err = extract_video_id(input).unwrap_err();
            assert!(
                matches!(err, HomeutilsError::InvalidInput(_)),
                "input: {input}"
            );
        }
    }
}
