//! # CLI Module
//!
//! Command implementations for spotgrab. Each command wires configuration,
//! the Spotify client, the result file and the external tools together and
//! takes care of user-facing output.
//!
//! ## Commands
//!
//! - [`extract`] - Reads a song list off a playlist screenshot
//! - [`convert`] - Turns a playlist text file into a result file of Spotify URLs
//! - [`download`] - Downloads an existing result file and organizes the audio files
//! - [`run`] - Both of the above in one go
//!
//! ## Pipeline
//!
//! ```text
//! playlist file
//!     ↓  strip ordinals, search each line (spotify)
//! result file (URLs and "# NOT FOUND" lines)
//!     ↓  external downloader (tools)
//! working directory with .m4a files
//!     ↓  convert / move / clean up (management)
//! <music dir>/<dd-Mon-yyyy>/
//! ```
//!
//! ## Error Handling
//!
//! Missing credentials, a missing input file and a rejected token request
//! end the program through [`crate::error!`]. A failed search only marks its
//! line as not found. A downloader exiting unsuccessfully is reported as an
//! incomplete download, and whatever it produced is still organized.

mod convert;
mod download;
mod extract;
mod run;

pub use convert::convert;
pub use convert::resolve_queries;
pub use download::DownloadOptions;
pub use download::download;
pub use download::download_and_organize;
pub use download::select_format;
pub use extract::extract;
pub use run::run;
