use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{Conversion, ConversionTableRow};

/// Folder names that are never touched while scanning or cleaning up the
/// working directory.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";
pub const PROTECTED_DIRS: [&str; 6] = ["node_modules", ".git", ".github", "src", "test", "media"];

/// First line of a song list written by `spotgrab extract`.
pub const PLAYLIST_HEADER: &str = "Playlist Songs";

/// Returns the trimmed, non-blank lines of a playlist file.
///
/// `=====` separator lines are skipped, and so is the `Playlist Songs`
/// header when it opens the file.
pub fn parse_queries(content: &str) -> Vec<String> {
    let mut lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() > 1 && lines[0] == PLAYLIST_HEADER && is_separator(lines[1]) {
        lines.remove(0);
    }

    lines
        .into_iter()
        .filter(|line| !is_separator(line))
        .map(String::from)
        .collect()
}

fn is_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '=')
}

/// Drops the leading token of a line that starts with a digit.
///
/// Numbered lists like `3. Track Name` or `12 Track Name` lose their number.
/// This is a heuristic: a title such as `1999 Prince` is cut to `Prince`.
pub fn strip_ordinal_prefix(line: &str) -> String {
    match line.chars().next() {
        Some(c) if c.is_ascii_digit() => line.split_whitespace().skip(1).collect::<Vec<_>>().join(" "),
        _ => line.to_string(),
    }
}

/// Name of the folder a run's files are collected in, e.g. `15-Oct-2026`.
pub fn date_folder_name(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

pub fn dated_destination(music_dir: &Path, date: NaiveDate) -> PathBuf {
    music_dir.join(date_folder_name(date))
}

/// True when any component of the path is the dependency cache folder.
pub fn is_in_dependency_cache(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == DEPENDENCY_CACHE_DIR)
}

/// True when a top-level folder of the working directory survives cleanup.
pub fn is_protected_dir(name: &str, destination_name: &str) -> bool {
    name == destination_name || PROTECTED_DIRS.contains(&name)
}

pub fn conversion_rows(conversions: &[Conversion]) -> Vec<ConversionTableRow> {
    conversions
        .iter()
        .map(|c| match &c.track {
            Some(track) => ConversionTableRow {
                query: c.query.clone(),
                track: track.name.clone(),
                artist: track.artist.clone(),
            },
            None => ConversionTableRow {
                query: c.query.clone(),
                track: "not found".to_string(),
                artist: String::new(),
            },
        })
        .collect()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
