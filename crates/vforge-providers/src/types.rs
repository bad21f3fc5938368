//! DTOs exchanged with collaborators.
//!
//! These are wire-shaped carrier types; the durable domain artifacts
//! built from them live in `vforge-models`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata for one source video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoInfo {
    /// Source platform video ID
    pub source_video_id: String,
    pub title: String,
    pub channel_id: String,
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    pub duration_seconds: u32,
    pub published_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Metadata for one channel.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChannelInfo {
    pub channel_id: String,
    pub name: String,
    pub subscriber_count: u64,
}

/// One collected comment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Comment {
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Sentiment analysis over a comment set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SentimentReport {
    pub total_comments: u32,
    pub positive_count: u32,
    pub negative_count: u32,
    pub positive_summary: String,
    pub negative_summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
    /// Identifier of the analyzing model
    pub model: String,
    /// Raw analyzer payload, persisted for audit
    #[serde(default)]
    pub raw_payload: serde_json::Value,
}

/// Transcript summarization output.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SummaryReport {
    pub one_line_summary: String,
    pub detailed_summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Additional context the summarizer extracted (tone, setting)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Structured script produced by the script generator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedScript {
    pub hook: String,
    pub intro: String,
    pub body: String,
    pub conclusion: String,
    pub full_script: String,
    pub estimated_duration_seconds: f64,
}

/// One generated image file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImageFile {
    pub file_path: String,
    pub file_size_bytes: u64,
    /// Resolution, e.g. "1024x1792"
    pub resolution: String,
}

/// Synthesized narration audio.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NarrationAudio {
    pub file_path: String,
    pub file_size_bytes: u64,
    pub duration_seconds: f64,
    pub provider: String,
    pub voice_id: String,
}

/// In-memory subtitle document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SubtitleDoc {
    pub content: String,
    pub line_count: u32,
    /// Subtitle format, e.g. "srt"
    pub format: String,
}

/// A persisted subtitle file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SubtitleFile {
    pub file_path: String,
    pub file_size_bytes: u64,
    pub line_count: u32,
}

/// Output of video composition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompositionOutput {
    pub file_path: String,
    pub file_size_bytes: u64,
    pub duration_seconds: f64,
    /// Resolution, e.g. "1080x1920"
    pub resolution: String,
    pub codec: String,
    pub fps: u32,
}
