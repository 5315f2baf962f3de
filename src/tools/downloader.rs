use std::{
    ffi::OsString,
    fmt,
    io::Error,
    path::Path,
    process::ExitStatus,
};

use tokio::process::Command;

#[derive(Debug)]
pub enum DownloadError {
    /// The downloader could not be started at all.
    Spawn(Error),
    /// The downloader ran but exited unsuccessfully.
    Incomplete(ExitStatus),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Spawn(e) => write!(f, "cannot start downloader: {}", e),
            DownloadError::Incomplete(status) => write!(f, "download incomplete ({})", status),
        }
    }
}

impl std::error::Error for DownloadError {}

pub struct Downloader {
    program: String,
}

impl Downloader {
    pub fn new(program: String) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for `<downloader> get -i <result_file> -d <work_dir>`.
    pub fn args(result_file: &Path, work_dir: &Path) -> Vec<OsString> {
        vec![
            OsString::from("get"),
            OsString::from("-i"),
            result_file.as_os_str().to_owned(),
            OsString::from("-d"),
            work_dir.as_os_str().to_owned(),
        ]
    }

    /// Runs the downloader against a result file and waits for it to exit.
    ///
    /// Output is inherited so the downloader's own progress stays visible.
    /// A non-zero exit is reported as [`DownloadError::Incomplete`]; files
    /// written before the failure are left in `work_dir`.
    pub async fn download(&self, result_file: &Path, work_dir: &Path) -> Result<(), DownloadError> {
        let status = Command::new(&self.program)
            .args(Self::args(result_file, work_dir))
            .status()
            .await
            .map_err(DownloadError::Spawn)?;

        if !status.success() {
            return Err(DownloadError::Incomplete(status));
        }

        Ok(())
    }
}
