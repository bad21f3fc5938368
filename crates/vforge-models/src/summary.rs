//! Content summarization artifact.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::VideoId;

/// Depth tag for a content summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SummaryDepth {
    Brief,
    #[default]
    Standard,
    Deep,
}

impl SummaryDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryDepth::Brief => "brief",
            SummaryDepth::Standard => "standard",
            SummaryDepth::Deep => "deep",
        }
    }
}

/// Summarization of a source video transcript.
///
/// Zero-or-one per run; the stage is skipped entirely when no
/// transcript is supplied.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentSummary {
    /// Unique row ID
    pub id: String,

    /// Owning scored video
    pub video_id: VideoId,

    /// Original transcript, when the caller wants it retained
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    /// One-line summary
    pub one_line_summary: String,

    /// Detailed summary
    pub detailed_summary: String,

    /// Key points extracted from the transcript
    #[serde(default)]
    pub key_points: Vec<String>,

    /// Summary depth tag
    #[serde(default)]
    pub depth: SummaryDepth,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_serde_labels() {
        assert_eq!(serde_json::to_string(&SummaryDepth::Deep).unwrap(), "\"deep\"");
    }

    #[test]
    fn test_summary_roundtrip() {
        let summary = ContentSummary {
            id: "s1".to_string(),
            video_id: VideoId::from_string("v1"),
            transcript: None,
            one_line_summary: "A quick take".to_string(),
            detailed_summary: "Longer take".to_string(),
            key_points: vec!["hook".to_string(), "payoff".to_string()],
            depth: SummaryDepth::Standard,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: ContentSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.key_points.len(), 2);
        assert!(!json.contains("transcript"));
    }
}
