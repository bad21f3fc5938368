//! Generated script artifact.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::format::ContentFormat;
use crate::ids::{ScriptId, VideoId};

/// Structured section map of a generated script.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScriptSections {
    /// Opening hook (first seconds)
    pub hook: String,
    /// Introduction
    pub intro: String,
    /// Main body
    pub body: String,
    /// Conclusion / call to action
    pub conclusion: String,
}

/// A generated narration script for one scored video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScriptArtifact {
    /// Unique script ID
    pub id: ScriptId,

    /// Owning scored video
    pub video_id: VideoId,

    /// What the script is for (e.g. "derivative short")
    pub purpose: String,

    /// Target audience the generator was steered toward
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,

    /// Expected narration duration in seconds
    pub expected_duration_seconds: f64,

    /// Structured section map
    pub sections: ScriptSections,

    /// Full assembled script text
    pub full_text: String,

    /// Format the script was generated for
    pub format: ContentFormat,

    /// Word count of the full text
    pub word_count: u32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ScriptArtifact {
    /// Build a script artifact, computing the word count from the text.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        video_id: VideoId,
        purpose: impl Into<String>,
        target_audience: Option<String>,
        expected_duration_seconds: f64,
        sections: ScriptSections,
        full_text: impl Into<String>,
        format: ContentFormat,
    ) -> Self {
        let full_text = full_text.into();
        let word_count = full_text.split_whitespace().count() as u32;
        Self {
            id: ScriptId::new(),
            video_id,
            purpose: purpose.into(),
            target_audience,
            expected_duration_seconds,
            sections,
            full_text,
            format,
            word_count,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        let script = ScriptArtifact::new(
            VideoId::new(),
            "derivative short",
            None,
            45.0,
            ScriptSections::default(),
            "one two  three\nfour",
            ContentFormat::Short,
        );
        assert_eq!(script.word_count, 4);
    }

    #[test]
    fn test_empty_text_word_count() {
        let script = ScriptArtifact::new(
            VideoId::new(),
            "derivative short",
            Some("gamers".to_string()),
            30.0,
            ScriptSections::default(),
            "",
            ContentFormat::Long,
        );
        assert_eq!(script.word_count, 0);
        assert_eq!(script.target_audience.as_deref(), Some("gamers"));
    }
}
