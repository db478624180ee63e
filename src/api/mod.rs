// file: src/api/mod.rs
// description: YouTube Data API v3 client and wire models

pub mod client;
pub mod models;

pub use client::YouTubeClient;
pub use models::{Comment, Video};
