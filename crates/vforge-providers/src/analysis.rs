//! Comment collection, sentiment analysis and summarization seams.

use async_trait::async_trait;

use vforge_models::ContentFormat;

use crate::error::ProviderResult;
use crate::types::{Comment, SentimentReport, SummaryReport};

/// Collects comments for a source video.
#[async_trait]
pub trait CommentCollector: Send + Sync {
    /// Collect up to the provider's cap of comments for the video.
    ///
    /// The format steers how many comments the collector bothers with
    /// (shorts accumulate far more, far shallower comments).
    async fn collect(&self, video_id: &str, format: ContentFormat)
        -> ProviderResult<Vec<Comment>>;
}

/// Classifies and summarizes a comment set.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        comments: &[Comment],
        format: ContentFormat,
    ) -> ProviderResult<SentimentReport>;
}

/// Summarizes a video transcript.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        transcript: &str,
        format: ContentFormat,
    ) -> ProviderResult<SummaryReport>;
}
