// file: src/api/models.rs
// description: wire models for the YouTube Data API v3 and their domain counterparts
// reference: https://developers.google.com/youtube/v3/docs

use serde::Deserialize;

/// One page of a listing endpoint: its items plus the continuation token.
pub trait Page {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

// --- channels.list ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPlaylists {
    pub uploads: String,
}

// --- playlistItems.list ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub snippet: Option<PlaylistItemSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub title: Option<String>,
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

impl Page for PlaylistItemListResponse {
    type Item = PlaylistItem;

    fn into_parts(self) -> (Vec<PlaylistItem>, Option<String>) {
        (self.items, self.next_page_token)
    }
}

// --- commentThreads.list ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: String,
    pub snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLevelComment {
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub text_display: Option<String>,
    pub text_original: Option<String>,
}

impl Page for CommentThreadListResponse {
    type Item = CommentThread;

    fn into_parts(self) -> (Vec<CommentThread>, Option<String>) {
        (self.items, self.next_page_token)
    }
}

// --- error envelope ---

#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}

// --- domain types ---

/// A video from the uploads playlist. Only the fields the scan needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
}

impl Video {
    /// Playlist items without a video ID (deleted or private entries)
    /// yield None and are skipped by the caller.
    pub fn from_playlist_item(item: PlaylistItem) -> Option<Self> {
        let snippet = item.snippet?;
        let id = snippet.resource_id.and_then(|r| r.video_id)?;
        let title = snippet.title.unwrap_or_else(|| id.clone());
        Some(Self { id, title })
    }
}

/// A top-level comment with the text used for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub text: String,
}

impl From<CommentThread> for Comment {
    fn from(thread: CommentThread) -> Self {
        let text = thread
            .snippet
            .and_then(|s| s.top_level_comment)
            .and_then(|c| c.snippet)
            .and_then(|s| s.text_display.or(s.text_original))
            .unwrap_or_default();

        Self {
            id: thread.id,
            text,
        }
    }
}
