use std::{fmt, io::Error, path::PathBuf};

use crate::types::ResolvedEntry;

#[derive(Debug)]
pub enum ResultFileError {
    IoError(Error),
}

impl fmt::Display for ResultFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultFileError::IoError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ResultFileError {}

impl From<Error> for ResultFileError {
    fn from(err: Error) -> Self {
        ResultFileError::IoError(err)
    }
}

/// The newline-delimited list of URLs and sentinel lines handed to the
/// downloader. Line order follows the order of the playlist file.
pub struct ResultFileManager {
    path: PathBuf,
    entries: Vec<ResolvedEntry>,
}

impl ResultFileManager {
    pub fn new(path: PathBuf, entries: Vec<ResolvedEntry>) -> Self {
        Self { path, entries }
    }

    pub async fn load(path: PathBuf) -> Result<Self, ResultFileError> {
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| ResultFileError::IoError(e))?;
        let entries = content.lines().map(ResolvedEntry::from_line).collect();
        Ok(Self { path, entries })
    }

    /// Writes all entries joined by `\n`, without a trailing newline.
    pub async fn persist(&self) -> Result<(), ResultFileError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ResultFileError::IoError(e))?;
            }
        }

        async_fs::write(&self.path, self.render())
            .await
            .map_err(|e| ResultFileError::IoError(e))
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn entries(&self) -> &Vec<ResolvedEntry> {
        &self.entries
    }

    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_found()).count()
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
