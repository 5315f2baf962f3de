//! Configuration management for spotgrab.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Spotify application credentials live here instead of
//! in source code, together with the locations and external programs the
//! download pipeline relies on, and the key for screenshot extraction.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (handled by the caller)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

use crate::types::Credentials;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_DOWNLOADER: &str = "freyr";
pub const DEFAULT_ENCODER: &str = "ffmpeg";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

const PLACEHOLDER_CLIENT_ID: &str = "YOUR_CLIENT_ID_HERE";
const PLACEHOLDER_CLIENT_SECRET: &str = "YOUR_CLIENT_SECRET_HERE";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `spotgrab/.env` inside the platform-specific
/// local data directory. Variables already present in the process environment
/// are not overridden.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotgrab/.env`
/// - macOS: `~/Library/Application Support/spotgrab/.env`
/// - Windows: `%LOCALAPPDATA%/spotgrab/.env`
///
/// A missing `.env` file is not an error; everything can also be supplied
/// through the environment.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the application's directory below the local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotgrab");
    path
}

/// Returns the Spotify application credentials.
///
/// Reads `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET`.
///
/// # Errors
///
/// Fails when either value is unset, empty, or still holds the placeholder
/// from `.env.example`.
pub fn spotify_credentials() -> Result<Credentials, String> {
    let client_id = env::var("SPOTIFY_API_AUTH_CLIENT_ID").unwrap_or_default();
    let client_secret = env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").unwrap_or_default();
    validate_credentials(client_id, client_secret)
}

/// Checks a credential pair for missing or placeholder values.
pub fn validate_credentials(client_id: String, client_secret: String) -> Result<Credentials, String> {
    let client_id = client_id.trim().to_string();
    let client_secret = client_secret.trim().to_string();

    if client_id.is_empty() || client_id == PLACEHOLDER_CLIENT_ID {
        return Err("SPOTIFY_API_AUTH_CLIENT_ID is not set".to_string());
    }
    if client_secret.is_empty() || client_secret == PLACEHOLDER_CLIENT_SECRET {
        return Err("SPOTIFY_API_AUTH_CLIENT_SECRET is not set".to_string());
    }

    Ok(Credentials {
        client_id,
        client_secret,
    })
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, falling back to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the Spotify OAuth token endpoint.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, falling back to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

/// Returns the root folder that receives the dated download folders.
///
/// Reads `SPOTGRAB_MUSIC_DIR`. Without it the platform audio directory is
/// used, then `~/Music`.
pub fn music_dir() -> PathBuf {
    if let Ok(dir) = env::var("SPOTGRAB_MUSIC_DIR") {
        return PathBuf::from(dir);
    }

    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Music")))
        .unwrap_or_else(|| PathBuf::from("Music"))
}

/// Returns the staging directory the downloader writes into.
///
/// Reads `SPOTGRAB_WORK_DIR`, falling back to `spotgrab/staging` in the
/// local data directory. Top-level folders in here are removed after every
/// run, so it should not point at a directory holding anything else.
pub fn work_dir() -> PathBuf {
    match env::var("SPOTGRAB_WORK_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => data_dir().join("staging"),
    }
}

/// Returns the downloader executable (`SPOTGRAB_DOWNLOADER`, default `freyr`).
pub fn downloader() -> String {
    env::var("SPOTGRAB_DOWNLOADER").unwrap_or_else(|_| DEFAULT_DOWNLOADER.to_string())
}

/// Returns the encoder executable (`SPOTGRAB_ENCODER`, default `ffmpeg`).
pub fn encoder() -> String {
    env::var("SPOTGRAB_ENCODER").unwrap_or_else(|_| DEFAULT_ENCODER.to_string())
}

/// Returns the key for the screenshot extraction endpoint (`OPENAI_API_KEY`).
pub fn openai_api_key() -> Result<String, String> {
    match env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err("OPENAI_API_KEY is not set".to_string()),
    }
}

/// Returns the chat completion base URL (`OPENAI_API_URL`, default
/// `https://api.openai.com/v1`).
pub fn openai_apiurl() -> String {
    env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string())
}

/// Returns the vision model (`OPENAI_MODEL`, default `gpt-4o-mini`).
pub fn openai_model() -> String {
    env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string())
}
