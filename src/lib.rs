//! Spotify track grabber library
//!
//! This library turns a plain-text list of song titles into Spotify track URLs
//! and hands them to an external downloader. Afterwards the produced audio
//! files are converted (optionally) and moved into a dated music folder.
//!
//! # Modules
//!
//! - `cli` - Command implementations wiring the pipeline steps together
//! - `config` - Configuration management and environment variables
//! - `management` - Result file persistence and music library organizing
//! - `spotify` - Spotify Web API client (token exchange and track search)
//! - `tools` - External downloader and encoder processes
//! - `types` - Data structures and type definitions
//! - `utils` - Query parsing, date folders and other helpers
//! - `vision` - Song list extraction from playlist screenshots
//!
//! # Example
//!
//! ```
//! use spotgrab::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spotgrab::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod management;
pub mod spotify;
pub mod tools;
pub mod types;
pub mod utils;
pub mod vision;

/// Result type for the fallible helpers that mix I/O and HTTP errors.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Status line prefixed with a blue `o`, e.g. `info!("Converting {} tracks...", n)`.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Status line prefixed with a green `✓`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with code 1.
///
/// Reserved for missing credentials, a missing input file, a rejected token
/// request and similar conditions after which the run cannot continue. The
/// expansion diverges, so it can stand in for a value in a `match` arm:
///
/// ```
/// let token = match client_credentials_token(&url, &creds).await {
///     Ok(token) => token,
///     Err(e) => error!("Failed to get token: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Status line prefixed with a yellow `!` for per-item failures that do not
/// stop the run, such as a failed search or a conversion that fell back to
/// moving the original.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
