use std::{ffi::OsString, fmt, io::Error, path::Path, process::ExitStatus};

use tokio::process::Command;

/// Bitrate used for mp3 output.
pub const MP3_BITRATE: &str = "320k";

#[derive(Debug)]
pub enum EncodeError {
    Spawn(Error),
    Failed { status: ExitStatus, stderr: String },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Spawn(e) => write!(f, "cannot start encoder: {}", e),
            EncodeError::Failed { status, stderr } => {
                let last_line = stderr.lines().last().unwrap_or_default();
                write!(f, "encoder exited with {} {}", status, last_line)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

pub struct Encoder {
    program: String,
}

impl Encoder {
    pub fn new(program: String) -> Self {
        Self { program }
    }

    /// Arguments for `<encoder> -i <in> -codec:a libmp3lame -b:a 320k -y <out>`.
    pub fn mp3_args(input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            OsString::from("-i"),
            input.as_os_str().to_owned(),
            OsString::from("-codec:a"),
            OsString::from("libmp3lame"),
            OsString::from("-b:a"),
            OsString::from(MP3_BITRATE),
            OsString::from("-y"),
            output.as_os_str().to_owned(),
        ]
    }

    /// Transcodes `input` to mp3 at `output`. Success means exit code zero;
    /// the input file is left untouched either way.
    pub async fn transcode_to_mp3(&self, input: &Path, output: &Path) -> Result<(), EncodeError> {
        let result = Command::new(&self.program)
            .args(Self::mp3_args(input, output))
            .output()
            .await
            .map_err(EncodeError::Spawn)?;

        if !result.status.success() {
            return Err(EncodeError::Failed {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).to_string(),
            });
        }

        Ok(())
    }
}
