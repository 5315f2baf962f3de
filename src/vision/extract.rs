use std::{fmt, io::Error, path::Path};

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use crate::{
    types::{ChatCompletionResponse, Song},
    utils::PLAYLIST_HEADER,
};

pub const EXTRACT_PROMPT: &str = "This is a screenshot of a music playlist. Extract ALL song titles and artist names. Return ONLY a JSON array with this exact format: [{\"title\": \"Song Name\", \"artist\": \"Artist Name\"}]. Do not include any other text, explanations, or markdown formatting. Just the raw JSON array.";

const MAX_TOKENS: u32 = 2000;

#[derive(Debug)]
pub enum VisionError {
    IoError(Error),
    Http(reqwest::Error),
    Status { status: StatusCode, message: String },
    Parse(String),
    NoSongs,
}

impl fmt::Display for VisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionError::IoError(e) => write!(f, "{}", e),
            VisionError::Http(e) => write!(f, "request failed: {}", e),
            VisionError::Status { status, message } => write!(f, "{} {}", status, message),
            VisionError::Parse(content) => write!(f, "cannot parse model answer: {}", content),
            VisionError::NoSongs => write!(f, "no songs found in the image"),
        }
    }
}

impl std::error::Error for VisionError {}

impl From<Error> for VisionError {
    fn from(err: Error) -> Self {
        VisionError::IoError(err)
    }
}

impl From<reqwest::Error> for VisionError {
    fn from(err: reqwest::Error) -> Self {
        VisionError::Http(err)
    }
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/png",
    }
}

/// Encodes image bytes as a `data:` URL for the `image_url` message part.
pub fn image_data_url(path: &Path, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type(path), STANDARD.encode(bytes))
}

pub async fn load_image(path: &Path) -> Result<String, VisionError> {
    let bytes = async_fs::read(path)
        .await
        .map_err(|e| VisionError::IoError(e))?;
    Ok(image_data_url(path, &bytes))
}

/// Parses the model's answer into songs.
///
/// Markdown code fences around the JSON array are removed first. An empty
/// array is reported as [`VisionError::NoSongs`].
pub fn parse_songs(content: &str) -> Result<Vec<Song>, VisionError> {
    let cleaned = content
        .trim()
        .replace("```json", "")
        .replace("```", "");

    let songs: Vec<Song> =
        serde_json::from_str(cleaned.trim()).map_err(|_| VisionError::Parse(content.to_string()))?;

    if songs.is_empty() {
        return Err(VisionError::NoSongs);
    }

    Ok(songs)
}

/// Renders songs as the numbered list `spotgrab convert` reads.
pub fn render_song_list(songs: &[Song]) -> String {
    let mut content = format!("{}\n{}\n\n", PLAYLIST_HEADER, "=".repeat(50));
    for (index, song) in songs.iter().enumerate() {
        match song.artist.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            Some(artist) => {
                content.push_str(&format!("{}. {} - {}\n", index + 1, song.title.trim(), artist))
            }
            None => content.push_str(&format!("{}. {}\n", index + 1, song.title.trim())),
        }
    }
    content
}

/// Asks the chat completion endpoint to list the songs visible in an image.
///
/// # Arguments
///
/// * `api_url` - Base URL, e.g. `https://api.openai.com/v1`
/// * `api_key` - Bearer key for the endpoint
/// * `model` - Vision-capable model name
/// * `image_url` - The screenshot as a `data:` URL (see [`load_image`])
///
/// # Errors
///
/// A non-success status becomes [`VisionError::Status`] carrying the
/// `error.message` of the response when there is one. Answers that are not a
/// JSON song array become [`VisionError::Parse`].
pub async fn extract_songs(
    api_url: &str,
    api_key: &str,
    model: &str,
    image_url: &str,
) -> Result<Vec<Song>, VisionError> {
    let body = json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": EXTRACT_PROMPT },
                { "type": "image_url", "image_url": { "url": image_url } }
            ]
        }],
        "max_tokens": MAX_TOKENS
    });

    let client = Client::new();
    let response = client
        .post(format!("{uri}/chat/completions", uri = api_url))
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .unwrap_or(text);
        return Err(VisionError::Status { status, message });
    }

    let res = response.json::<ChatCompletionResponse>().await?;
    let content = res
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    parse_songs(&content)
}
