// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for scan execution
// reference: uses indicatif for progress bars and tracks scan counters

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub videos_scanned: usize,
    pub videos_failed: usize,
    pub comments_fetched: usize,
    pub spam_flagged: usize,
    pub comments_deleted: usize,
    pub duration_secs: u64,
    /// Whether the run was a dry run, CLI flag or config either way.
    pub dry_run: bool,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The one human-readable status line a scan reports with.
    pub fn status_line(&self) -> String {
        if self.dry_run && self.spam_flagged > 0 {
            format!(
                "Dry run: {} spam comments would be rejected",
                self.spam_flagged
            )
        } else if self.comments_deleted > 0 {
            format!("Rejected {} spam comments", self.comments_deleted)
        } else {
            "No spam comments found".to_string()
        }
    }

    pub fn videos_total(&self) -> usize {
        self.videos_scanned + self.videos_failed
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.videos_total();
        if total == 0 {
            return 0.0;
        }
        (self.videos_scanned as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    videos_scanned: AtomicUsize,
    videos_failed: AtomicUsize,
    comments_fetched: AtomicUsize,
    spam_flagged: AtomicUsize,
    comments_deleted: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_videos: usize) -> Self {
        Self::with_color(total_videos, true)
    }

    pub fn with_color(total_videos: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_videos as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            videos_scanned: AtomicUsize::new(0),
            videos_failed: AtomicUsize::new(0),
            comments_fetched: AtomicUsize::new(0),
            spam_flagged: AtomicUsize::new(0),
            comments_deleted: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_videos_scanned(&self) {
        self.videos_scanned.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_videos_failed(&self) {
        self.videos_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_comments_fetched(&self, count: usize) {
        self.comments_fetched.fetch_add(count, Ordering::SeqCst);
    }

    pub fn add_spam_flagged(&self, count: usize) {
        self.spam_flagged.fetch_add(count, Ordering::SeqCst);
        self.update_detail_bar();
    }

    pub fn add_comments_deleted(&self, count: usize) {
        self.comments_deleted.fetch_add(count, Ordering::SeqCst);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Scan complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_report(&self) -> ScanReport {
        ScanReport {
            videos_scanned: self.videos_scanned.load(Ordering::SeqCst),
            videos_failed: self.videos_failed.load(Ordering::SeqCst),
            comments_fetched: self.comments_fetched.load(Ordering::SeqCst),
            spam_flagged: self.spam_flagged.load(Ordering::SeqCst),
            comments_deleted: self.comments_deleted.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
            dry_run: false,
        }
    }

    fn update_detail_bar(&self) {
        let flagged = self.spam_flagged.load(Ordering::SeqCst);
        let deleted = self.comments_deleted.load(Ordering::SeqCst);
        let failed = self.videos_failed.load(Ordering::SeqCst);

        let message = format!(
            "Flagged: {} | Deleted: {} | Failed videos: {}",
            flagged, deleted, failed
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}
