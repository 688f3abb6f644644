use crate::domain::{RegionCode, VideoRecord};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::time::Duration;

/// The resource parts requested for every video.
const VIDEO_PARTS: &str = "snippet,statistics";

/// Longest error body we carry around when it isn't Google's JSON error format.
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Connection error: is the YouTube API reachable?")]
    Request(#[source] reqwest::Error),
    #[error("YouTube API returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("YouTube API response doesn't match the expected JSON schema")]
    Decode(#[source] reqwest::Error),
}

/// General response from the `videos.list` method.
/// YouTube documentation: https://developers.google.com/youtube/v3/docs/videos/list
#[derive(Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Body of a failed request, common to all Google APIs.
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// A Video resource, restricted to the parts in `VIDEO_PARTS`.
/// YouTube documentation: https://developers.google.com/youtube/v3/docs/videos#resource
#[derive(Deserialize)]
struct YTVideo {
    #[serde(default)]
    id: String,
    #[serde(default)]
    snippet: YTSnippet,
    #[serde(default)]
    statistics: YTStatistics,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YTSnippet {
    published_at: Option<String>,
    title: Option<String>,
    channel_title: Option<String>,
    category_id: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Counts arrive as decimal strings, and are omitted when the uploader hides them.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YTStatistics {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    view_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    like_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    comment_count: Option<u64>,
}

impl From<YTVideo> for VideoRecord {
    fn from(video: YTVideo) -> Self {
        let YTVideo {
            id,
            snippet,
            statistics,
        } = video;
        Self {
            video_id: id,
            published_at: snippet.published_at,
            title: snippet.title,
            channel_title: snippet.channel_title,
            category_id: snippet.category_id,
            tags: snippet.tags.join("|"),
            view_count: statistics.view_count,
            like_count: statistics.like_count,
            comment_count: statistics.comment_count,
        }
    }
}

/// Flattens one raw item of a `videos.list` response into a CSV row.
pub fn to_record(item: &serde_json::Value) -> Result<VideoRecord, serde_json::Error> {
    YTVideo::deserialize(item).map(VideoRecord::from)
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => response.error.message,
        Err(_) => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

pub struct YouTubeClient {
    http_client: Client,
    base_url: String,
    api_key: SecretString,
}

impl YouTubeClient {
    pub fn new(
        base_url: String,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Request)?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }

    /// Retrieves a single page of the region's "most popular" chart, as raw JSON items.
    /// YouTube documentation: https://developers.google.com/youtube/v3/docs/videos/list
    #[tracing::instrument(
        name = "Fetching the most popular videos",
        skip(self, region),
        fields(region = %region)
    )]
    pub async fn most_popular(
        &self,
        region: &RegionCode,
        max_results: u8,
    ) -> Result<Vec<serde_json::Value>, ApiError> {
        let url = format!("{}/videos", self.base_url.trim_end_matches('/'));
        let max_results = max_results.to_string();
        // reqwest errors embed the URL, which carries the key; strip it before propagating.
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", VIDEO_PARTS),
                ("chart", "mostPopular"),
                ("regionCode", region.as_ref()),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                message: error_message(&body),
            });
        }

        let packet: VideoListResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.without_url()))?;
        tracing::info!("YouTube API returned {} videos", packet.items.len());
        Ok(packet.items)
    }
}
