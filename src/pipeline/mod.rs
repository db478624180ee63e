// file: src/pipeline/mod.rs
// description: scan pipeline module exports

pub mod orchestrator;
pub mod progress;

pub use orchestrator::{ScanOptions, ScanOrchestrator};
pub use progress::{ProgressTracker, ScanReport};
