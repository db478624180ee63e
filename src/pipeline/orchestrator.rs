// file: src/pipeline/orchestrator.rs
// description: coordinates auth, playlist enumeration, comment scanning, and moderation
// reference: sequential scan workflow, one request in flight at a time

use crate::api::YouTubeClient;
use crate::auth::{TokenMode, TokenProvider};
use crate::config::Config;
use crate::error::Result;
use crate::filter::{SpamFilter, WordList};
use crate::pipeline::progress::{ProgressTracker, ScanReport};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub mode: TokenMode,
    pub dry_run: bool,
    pub limit: Option<usize>,
}

pub struct ScanOrchestrator {
    config: Config,
    token_provider: TokenProvider,
}

impl ScanOrchestrator {
    pub fn new(config: Config) -> Self {
        let token_provider = TokenProvider::new(config.auth.clone());
        Self {
            config,
            token_provider,
        }
    }

    /// Run the full scan. Top-level failures (auth, channel lookup, playlist
    /// listing, word list) abort the scan; per-video failures are logged and
    /// the remaining videos still get processed.
    pub async fn run(&self, options: &ScanOptions) -> Result<ScanReport> {
        info!("Starting spam scan");

        let dry_run = options.dry_run || self.config.scan.dry_run;

        let token = self.token_provider.acquire(options.mode).await?;
        let client = YouTubeClient::new(&self.config.api, token);

        let uploads_id = client.uploads_playlist_id().await?;
        info!("Uploads playlist: {}", uploads_id);

        let mut videos = client.list_uploads(&uploads_id).await?;
        info!("Found {} videos", videos.len());

        if let Some(limit) = options.limit.or(self.config.scan.max_videos) {
            videos.truncate(limit);
        }

        if videos.is_empty() {
            warn!("No videos in the uploads playlist");
            return Ok(ScanReport {
                dry_run,
                ..ScanReport::new()
            });
        }

        // load the word list once, immutable for the whole run
        let word_list = WordList::load(&self.config.filter.wordlist_path)?;
        if word_list.is_empty() {
            warn!("Blocked-word list is empty, nothing will be flagged");
        }
        let filter = SpamFilter::new(&word_list);

        if dry_run {
            info!("Dry run: spam will be flagged but not rejected");
        }

        let progress = ProgressTracker::new(videos.len());

        for video in &videos {
            progress.set_message(format!("Scanning {}", video.title));

            match self
                .scan_video(&client, &filter, video, dry_run, &progress)
                .await
            {
                Ok(()) => progress.inc_videos_scanned(),
                Err(e) => {
                    progress.inc_videos_failed();
                    warn!("Failed to scan video {} ({}): {}", video.title, video.id, e);
                }
            }
        }

        let mut report = progress.get_report();
        report.dry_run = dry_run;
        progress.finish();

        self.log_final_report(&report);

        Ok(report)
    }

    async fn scan_video(
        &self,
        client: &YouTubeClient,
        filter: &SpamFilter,
        video: &crate::api::Video,
        dry_run: bool,
        progress: &ProgressTracker,
    ) -> Result<()> {
        let comments = client.list_comment_threads(&video.id).await?;
        debug!("Fetched {} comments for {}", comments.len(), video.id);
        progress.add_comments_fetched(comments.len());

        let spam_ids = filter.flag_spam(&comments);
        if spam_ids.is_empty() {
            debug!("No spam on {}", video.id);
            return Ok(());
        }

        info!(
            "Flagged {} spam comments on {} ({})",
            spam_ids.len(),
            video.title,
            video.id
        );
        progress.add_spam_flagged(spam_ids.len());

        if dry_run {
            return Ok(());
        }

        let deleted = reject_comments(client, &spam_ids).await;
        progress.add_comments_deleted(deleted);
        info!(
            "Rejected {}/{} comments for video {}",
            deleted,
            spam_ids.len(),
            video.id
        );

        Ok(())
    }

    fn log_final_report(&self, report: &ScanReport) {
        info!("=== Scan Summary ===");
        info!("Duration: {} seconds", report.duration_secs);
        info!("Videos scanned: {}", report.videos_scanned);
        info!("Videos failed: {}", report.videos_failed);
        info!("Success rate: {:.2}%", report.success_rate());
        info!("Comments fetched: {}", report.comments_fetched);
        info!("Spam flagged: {}", report.spam_flagged);
        if report.dry_run {
            info!("Comments rejected: 0 (dry run)");
        } else {
            info!("Comments rejected: {}", report.comments_deleted);
        }
        info!("====================");
    }
}

/// Sequential moderation rejection, one network call per comment ID. A
/// failed call is logged and skipped; it never aborts the rest of the batch.
async fn reject_comments(client: &YouTubeClient, comment_ids: &[String]) -> usize {
    let mut deleted = 0;

    for id in comment_ids {
        match client.reject_comment(id).await {
            Ok(()) => {
                deleted += 1;
                debug!("Rejected comment {}", id);
            }
            Err(e) => warn!("Failed to reject comment {}: {}", id, e),
        }
    }

    deleted
}
