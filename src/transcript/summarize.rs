use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Build the analysis prompt, capping the transcript at `char_limit`
/// characters to stay under the model's token limits.
pub fn build_prompt(transcript: &str, char_limit: usize) -> String {
    let truncated: String = transcript.chars().take(char_limit).collect();

    format!(
        "Analyze the following YouTube video transcript and provide:\n\
         \n\
         1. **Summary** (2-3 paragraphs): What is this video about?\n\
         \n\
         2. **Key Points** (bullet list): The main takeaways from the video\n\
         \n\
         3. **Notable Quotes** (if any): Any particularly impactful or memorable statements\n\
         \n\
         4. **Topics Covered** (tags): List the main topics/themes as tags\n\
         \n\
         ---\n\
         \n\
         TRANSCRIPT:\n\
         {truncated}\n"
    )
}

/// Summarize a transcript with the Gemini API.
///
/// Callers treat failures here as non-fatal; the transcript has already been
/// saved by the time this runs.
pub async fn summarize(
    client: &reqwest::Client,
    api_key: &str,
    model: &str,
    transcript: &str,
    char_limit: usize,
) -> Result<String> {
    let url = format!("{API_BASE}/{model}:generateContent?key={api_key}");

    let request = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: build_prompt(transcript, char_limit),
            }],
        }],
    };

    tracing::info!("Requesting summary from Gemini model: {}", model);

    let response = client
        .post(&url)
        .json(&request)
        .send()
        .await
        .context("summarization request failed")?;

    if !response.status().is_success() {
        anyhow::bail!("summarization service returned HTTP {}", response.status());
    }

    let body: GenerateResponse = response
        .json()
        .await
        .context("failed to parse summarization response")?;

    let text = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .context("summarization response contained no text")?;

    Ok(text)
}
