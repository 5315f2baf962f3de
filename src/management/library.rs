use std::{
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    info,
    tools::Encoder,
    types::{OrganizeReport, OutputFormat},
    utils, warning,
};

/// Extension of the files the downloader produces.
pub const SOURCE_EXTENSION: &str = "m4a";

#[derive(Debug)]
pub enum OrganizeError {
    IoError(Error),
}

impl fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganizeError::IoError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for OrganizeError {}

impl From<Error> for OrganizeError {
    fn from(err: Error) -> Self {
        OrganizeError::IoError(err)
    }
}

/// Moves the downloader's output out of the working directory into the
/// dated destination folder, converting it on the way when mp3 was chosen.
pub struct LibraryManager {
    work_dir: PathBuf,
    destination: PathBuf,
    format: OutputFormat,
    encoder: Encoder,
}

impl LibraryManager {
    pub fn new(work_dir: PathBuf, destination: PathBuf, format: OutputFormat, encoder: Encoder) -> Self {
        Self {
            work_dir,
            destination,
            format,
            encoder,
        }
    }

    /// Creates the destination folder and its parents. Calling it again for
    /// an existing folder is a no-op.
    pub async fn prepare_destination(&self) -> Result<(), OrganizeError> {
        async_fs::create_dir_all(&self.destination)
            .await
            .map_err(|e| OrganizeError::IoError(e))
    }

    pub fn destination(&self) -> &PathBuf {
        &self.destination
    }

    /// Finds every `.m4a` file below the working directory, skipping the
    /// dependency cache and the destination folder itself.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.work_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .map(|ext| ext == SOURCE_EXTENSION)
                    .unwrap_or(false)
            })
            .filter(|path| !utils::is_in_dependency_cache(path))
            .filter(|path| !path.starts_with(&self.destination))
            .collect();

        files.sort();
        files
    }

    /// Processes all scanned files and then removes the intermediate folders
    /// the downloader left behind.
    pub async fn organize(&self) -> OrganizeReport {
        let mut report = OrganizeReport::default();

        for file in self.scan() {
            let file_name = match file.file_name() {
                Some(name) => name.to_owned(),
                None => continue,
            };
            let dest_file = self.destination.join(&file_name);

            if self.format == OutputFormat::Mp3 {
                let mp3_dest = dest_file.with_extension(OutputFormat::Mp3.extension());
                info!(
                    "Converting: {} -> {}",
                    file_name.to_string_lossy(),
                    mp3_dest.file_name().unwrap_or_default().to_string_lossy()
                );

                match self.encoder.transcode_to_mp3(&file, &mp3_dest).await {
                    Ok(_) => {
                        if let Err(e) = async_fs::remove_file(&file).await {
                            warning!("Cannot remove {}: {}", file.display(), e);
                        }
                        report.converted += 1;
                        continue;
                    }
                    Err(e) => {
                        warning!(
                            "Conversion failed, keeping {}: {}",
                            file_name.to_string_lossy(),
                            e
                        );
                    }
                }
            }

            match move_file(&file, &dest_file).await {
                Ok(_) => report.moved += 1,
                Err(e) => warning!("Cannot move {}: {}", file.display(), e),
            }
        }

        report.removed_dirs = self.cleanup().await;
        report
    }

    /// Deletes every top-level folder of the working directory that is not
    /// on the allow-list and does not contain the destination. Returns the
    /// folders that were removed.
    pub async fn cleanup(&self) -> Vec<PathBuf> {
        let destination_name = self
            .destination
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let candidates: Vec<PathBuf> = WalkDir::new(&self.work_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir())
            .filter(|entry| {
                !utils::is_protected_dir(&entry.file_name().to_string_lossy(), &destination_name)
            })
            .filter(|entry| !self.destination.starts_with(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        let mut removed = Vec::new();
        for dir in candidates {
            match async_fs::remove_dir_all(&dir).await {
                Ok(_) => removed.push(dir),
                Err(e) => warning!("Cannot remove {}: {}", dir.display(), e),
            }
        }

        removed
    }
}

/// Renames a file, falling back to copy and delete when the rename crosses
/// filesystems.
pub async fn move_file(from: &Path, to: &Path) -> Result<(), OrganizeError> {
    if async_fs::rename(from, to).await.is_ok() {
        return Ok(());
    }

    async_fs::copy(from, to)
        .await
        .map_err(|e| OrganizeError::IoError(e))?;
    async_fs::remove_file(from)
        .await
        .map_err(|e| OrganizeError::IoError(e))
}
