//! # Spotify Integration Module
//!
//! Thin client for the two Spotify Web API calls the pipeline needs:
//!
//! ```text
//! CLI Layer (convert, run)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 client credentials)
//!     └── Track Search (top hit per query)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Authentication
//!
//! [`auth`] exchanges the application's client id and secret for a bearer
//! token. The token is used for the duration of one run; there is no refresh
//! and no caching on disk.
//!
//! ## Search
//!
//! [`search`] issues `GET /search?type=track&limit=1` and trusts Spotify's
//! ranking of the first item. Failures are reported per query so the caller
//! can record a sentinel and carry on.
//!
//! Both modules take their endpoint URLs as arguments; the CLI reads them
//! from [`crate::config`].

pub mod auth;
pub mod search;
