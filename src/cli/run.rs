use std::path::PathBuf;

use crate::cli::{convert, download::DownloadOptions, download_and_organize};

/// Converts the playlist file and downloads the result straight away.
pub async fn run(input: PathBuf, output: PathBuf, options: DownloadOptions) {
    let results = convert(input, output).await;
    download_and_organize(&results, options).await;
}
