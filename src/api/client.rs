// file: src/api/client.rs
// description: authenticated client for channel lookup, paginated listing, and comment moderation
// reference: https://developers.google.com/youtube/v3/docs

use crate::api::models::{
    ApiErrorEnvelope, ChannelListResponse, Comment, CommentThreadListResponse, Page,
    PlaylistItemListResponse, Video,
};
use crate::auth::AccessToken;
use crate::config::ApiConfig;
use crate::error::{Result, SweepError};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;

pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    token: AccessToken,
    playlist_page_size: u32,
    comment_page_size: u32,
}

impl YouTubeClient {
    pub fn new(config: &ApiConfig, token: AccessToken) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            playlist_page_size: config.playlist_page_size,
            comment_page_size: config.comment_page_size,
        }
    }

    /// Resolve the authenticated channel's uploads playlist ID.
    pub async fn uploads_playlist_id(&self) -> Result<String> {
        let query = [
            ("part", "contentDetails".to_string()),
            ("mine", "true".to_string()),
        ];

        let channels: ChannelListResponse = self.get_json("/channels", &query).await?;

        let first = channels
            .items
            .into_iter()
            .next()
            .ok_or(SweepError::NoChannel)?;

        Ok(first.content_details.related_playlists.uploads)
    }

    /// Fetch every video in the uploads playlist, following pagination to
    /// the end. Playlist entries without a video ID are skipped.
    pub async fn list_uploads(&self, playlist_id: &str) -> Result<Vec<Video>> {
        let items = collect_pages::<PlaylistItemListResponse, _, _>(|page_token| async move {
            let mut query = vec![
                ("part", "snippet".to_string()),
                ("playlistId", playlist_id.to_string()),
                ("maxResults", self.playlist_page_size.to_string()),
            ];
            if let Some(token) = page_token {
                query.push(("pageToken", token));
            }

            self.get_json("/playlistItems", &query).await
        })
        .await?;

        debug!("Fetched {} playlist items", items.len());

        Ok(items
            .into_iter()
            .filter_map(Video::from_playlist_item)
            .collect())
    }

    /// Fetch every top-level comment thread for a video, following
    /// pagination to the end.
    pub async fn list_comment_threads(&self, video_id: &str) -> Result<Vec<Comment>> {
        let items = collect_pages::<CommentThreadListResponse, _, _>(|page_token| async move {
            let mut query = vec![
                ("part", "snippet".to_string()),
                ("videoId", video_id.to_string()),
                ("maxResults", self.comment_page_size.to_string()),
            ];
            if let Some(token) = page_token {
                query.push(("pageToken", token));
            }

            self.get_json("/commentThreads", &query).await
        })
        .await?;

        Ok(items.into_iter().map(Comment::from).collect())
    }

    /// Moderation-reject a single comment. The comment is hidden, not
    /// deleted outright.
    pub async fn reject_comment(&self, comment_id: &str) -> Result<()> {
        let url = format!("{}/comments/setModerationStatus", self.base_url);
        let query = [("id", comment_id), ("moderationStatus", "rejected")];

        let response = self
            .client
            .post(&url)
            .query(&query)
            .bearer_auth(self.token.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(self.token.as_str())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Accumulate items across pages, passing the continuation token back into
/// `fetch_page` until the response carries none. An empty-string token also
/// terminates, matching what the API sends on the last page.
pub(crate) async fn collect_pages<P, F, Fut>(mut fetch_page: F) -> Result<Vec<P::Item>>
where
    P: Page,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = fetch_page(page_token.take()).await?;
        let (page_items, next) = page.into_parts();
        items.extend(page_items);

        match next {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    Ok(items)
}

/// Map a non-OK response to an API error. A body that is not the JSON error
/// envelope is still a hard error; the raw body is carried in the message
/// instead of being swallowed.
fn api_error(status: u16, body: &str) -> SweepError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| body_snippet(body));

    SweepError::Api { status, message }
}

fn body_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    trimmed.chars().take(200).collect()
}
