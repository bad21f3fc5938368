//! Comment sentiment analysis artifact.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::VideoId;

/// Result of collecting and analyzing comments for one scored video.
///
/// One-to-one with a `ScoredVideo` per run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommentAnalysis {
    /// Unique row ID
    pub id: String,

    /// Owning scored video
    pub video_id: VideoId,

    /// Number of comments analyzed
    pub total_comments: u32,

    /// Comments classified positive
    pub positive_count: u32,

    /// Comments classified negative
    pub negative_count: u32,

    /// Free-text summary of positive sentiment
    pub positive_summary: String,

    /// Free-text summary of negative sentiment
    pub negative_summary: String,

    /// Recurring keywords across analyzed comments
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Suggested content improvements distilled from comments
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,

    /// Raw analyzer payload, kept for audit/debugging
    #[serde(default)]
    pub raw_payload: serde_json::Value,

    /// Identifier of the model that produced the analysis
    pub model: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl CommentAnalysis {
    /// Positive share of classified comments, in `[0, 1]`.
    ///
    /// Neutral comments (neither positive nor negative) dilute the
    /// ratio only through `total_comments` counts, not here.
    pub fn positive_ratio(&self) -> f64 {
        let classified = self.positive_count + self.negative_count;
        if classified == 0 {
            return 0.0;
        }
        self.positive_count as f64 / classified as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(positive: u32, negative: u32) -> CommentAnalysis {
        CommentAnalysis {
            id: "a1".to_string(),
            video_id: VideoId::new(),
            total_comments: positive + negative,
            positive_count: positive,
            negative_count: negative,
            positive_summary: String::new(),
            negative_summary: String::new(),
            keywords: vec![],
            improvement_suggestions: vec![],
            raw_payload: serde_json::Value::Null,
            model: "test-model".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_positive_ratio() {
        assert_eq!(analysis(3, 1).positive_ratio(), 0.75);
        assert_eq!(analysis(0, 5).positive_ratio(), 0.0);
    }

    #[test]
    fn test_positive_ratio_no_comments() {
        let a = analysis(0, 0);
        assert_eq!(a.positive_ratio(), 0.0);
        assert!(a.positive_ratio().is_finite());
    }
}
