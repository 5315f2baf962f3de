use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Marker that starts every sentinel line in a result file.
pub const NOT_FOUND_PREFIX: &str = "# NOT FOUND: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TracksPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksPage {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

/// Top search hit for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    pub url: String,
    pub name: String,
    pub artist: String,
}

/// One line of a result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEntry {
    Found { url: String },
    NotFound { query: String },
}

impl ResolvedEntry {
    pub fn from_line(line: &str) -> Self {
        match line.strip_prefix(NOT_FOUND_PREFIX) {
            Some(query) => ResolvedEntry::NotFound {
                query: query.to_string(),
            },
            None => ResolvedEntry::Found {
                url: line.to_string(),
            },
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolvedEntry::Found { .. })
    }
}

impl fmt::Display for ResolvedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedEntry::Found { url } => write!(f, "{}", url),
            ResolvedEntry::NotFound { query } => write!(f, "{}{}", NOT_FOUND_PREFIX, query),
        }
    }
}

/// Outcome of converting one input line.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub query: String,
    pub entry: ResolvedEntry,
    pub track: Option<TrackMatch>,
}

#[derive(Tabled)]
pub struct ConversionTableRow {
    pub query: String,
    pub track: String,
    pub artist: String,
}

/// Audio format the downloaded files end up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    M4a,
    Mp3,
}

impl OutputFormat {
    /// Maps a user choice to a format. Only `2` or `mp3` select mp3, anything
    /// else falls back to m4a.
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim().to_lowercase().as_str() {
            "2" | "mp3" => OutputFormat::Mp3,
            _ => OutputFormat::M4a,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::M4a => "m4a",
            OutputFormat::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Counters and leftovers from organizing a finished download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    pub converted: usize,
    pub moved: usize,
    pub removed_dirs: Vec<PathBuf>,
}

/// A song read off a playlist screenshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub number: usize,
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: Option<String>,
}
