//! # Vision Module
//!
//! Reads song titles and artists off a screenshot of a playlist by sending
//! the image to an OpenAI-compatible chat completion endpoint. The answer is
//! written as a numbered song list that `spotgrab convert` accepts as input:
//!
//! ```text
//! Playlist Songs
//! ==================================================
//!
//! 1. Bohemian Rhapsody - Queen
//! 2. Imagine - John Lennon
//! ```
//!
//! Nothing checks that the model read the screenshot correctly; the list is
//! meant to be looked over before converting it.

pub mod extract;
