use serde::Serialize;

/// One row of the output CSV. Field order is column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub published_at: Option<String>,
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub category_id: Option<String>,
    /// The video's tags, joined with `|`.
    pub tags: String,
    /// `None` when the uploader hides the statistic.
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}
