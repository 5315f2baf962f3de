mod library;
mod results;

pub use library::LibraryManager;
pub use library::OrganizeError;
pub use library::SOURCE_EXTENSION;
pub use library::move_file;
pub use results::ResultFileError;
pub use results::ResultFileManager;
