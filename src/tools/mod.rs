//! External programs the pipeline delegates to.
//!
//! - [`Downloader`] fetches the tracks listed in a result file
//! - [`Encoder`] transcodes a single audio file
//!
//! Both are treated as black boxes: only their arguments and exit status
//! matter here.

mod downloader;
mod encoder;

pub use downloader::DownloadError;
pub use downloader::Downloader;
pub use encoder::EncodeError;
pub use encoder::Encoder;
