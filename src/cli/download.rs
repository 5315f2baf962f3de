use std::{
    io::{IsTerminal, Write},
    path::PathBuf,
};

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    config, error, info,
    management::{LibraryManager, ResultFileManager},
    success,
    tools::{DownloadError, Downloader, Encoder},
    types::OutputFormat,
    utils, warning,
};

/// Settings shared by the `download` and `run` commands. Unset values fall
/// back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub format: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub music_dir: Option<PathBuf>,
}

pub async fn download(urls: PathBuf, options: DownloadOptions) {
    let results = match ResultFileManager::load(urls.clone()).await {
        Ok(results) => results,
        Err(e) => error!("Cannot read result file {}: {}", urls.display(), e),
    };

    download_and_organize(&results, options).await;
}

/// Picks the output format.
///
/// An explicit choice always wins. Without one the user is asked on an
/// interactive terminal; otherwise m4a is used.
pub async fn select_format(choice: Option<String>) -> OutputFormat {
    if let Some(choice) = choice {
        return OutputFormat::from_choice(&choice);
    }

    if !std::io::stdin().is_terminal() {
        return OutputFormat::default();
    }

    println!("Choose output format:");
    println!("  1) m4a (default, smaller file size)");
    println!("  2) mp3 (more compatible)");
    print!("Enter choice (1 or 2): ");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    match reader.read_line(&mut line).await {
        Ok(_) => OutputFormat::from_choice(&line),
        Err(_) => OutputFormat::default(),
    }
}

pub async fn download_and_organize(results: &ResultFileManager, options: DownloadOptions) {
    let format = select_format(options.format).await;
    info!("Selected format: {}", format);

    let work_dir = options.work_dir.unwrap_or_else(config::work_dir);
    let music_dir = options.music_dir.unwrap_or_else(config::music_dir);
    let destination = utils::dated_destination(&music_dir, Local::now().date_naive());

    let library = LibraryManager::new(
        work_dir.clone(),
        destination,
        format,
        Encoder::new(config::encoder()),
    );

    if let Err(e) = library.prepare_destination().await {
        error!(
            "Cannot create output directory {}: {}",
            library.destination().display(),
            e
        );
    }
    info!("Output directory: {}", library.destination().display());

    if let Err(e) = async_fs::create_dir_all(&work_dir).await {
        error!("Cannot create working directory {}: {}", work_dir.display(), e);
    }

    info!("Downloading {} tracks...", results.found_count());
    let downloader = Downloader::new(config::downloader());
    match downloader.download(results.path(), &work_dir).await {
        Ok(_) => success!("Download finished"),
        Err(DownloadError::Spawn(e)) => {
            error!("Cannot start downloader '{}': {}", downloader.program(), e)
        }
        Err(e) => warning!("{}, organizing what was downloaded", e),
    }

    info!("Organizing files...");
    let report = library.organize().await;

    success!("Complete!");
    if report.converted > 0 {
        info!("Converted: {} files to mp3", report.converted);
    }
    if report.moved > 0 {
        info!("Moved: {} files", report.moved);
    }
    info!("Location: {}", library.destination().display());
}
