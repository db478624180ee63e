// file: src/lib.rs
// description: library entry point and public api exports
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod utils;

pub use api::{Comment, Video, YouTubeClient};
pub use auth::{AccessToken, TokenMode, TokenProvider};
pub use config::{ApiConfig, AuthConfig, Config, FilterConfig, ScanConfig};
pub use error::{Result, SweepError};
pub use filter::{SpamFilter, WordList};
pub use pipeline::{ProgressTracker, ScanOptions, ScanOrchestrator, ScanReport};
