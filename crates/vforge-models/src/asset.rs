//! Generated media asset artifacts.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::ScriptId;

/// Asset generation status.
///
/// This is the single artifact field that legitimately transitions
/// after creation (an asynchronously-composited video moving
/// pending -> processing -> completed | failed). All other artifact
/// types are written once in a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Processing => "processing",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Failed)
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type-specific payload of a generated asset.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "asset_type", rename_all = "snake_case")]
pub enum AssetKind {
    /// A generated still image
    Image {
        /// Prompt the image was generated from
        prompt: String,
        /// Resolution, e.g. "1024x1792"
        resolution: String,
        /// Position within the script's image sequence
        sequence_index: u32,
    },
    /// Synthesized narration audio
    Voice {
        /// Audio duration in seconds
        duration_seconds: f64,
        /// Synthesis provider name
        provider: String,
        /// Provider-specific voice ID
        voice_id: String,
    },
    /// A subtitle document
    Subtitle {
        /// Subtitle format, e.g. "srt"
        format: String,
        /// Number of subtitle cues
        line_count: u32,
    },
    /// A composited output video
    Video {
        /// Resolution, e.g. "1080x1920"
        resolution: String,
        /// Output duration in seconds
        duration_seconds: f64,
        /// Video codec, e.g. "h264"
        codec: String,
        /// Frames per second
        fps: u32,
    },
}

impl AssetKind {
    /// Stable label for the tagged union discriminant.
    pub fn type_label(&self) -> &'static str {
        match self {
            AssetKind::Image { .. } => "image",
            AssetKind::Voice { .. } => "voice",
            AssetKind::Subtitle { .. } => "subtitle",
            AssetKind::Video { .. } => "video",
        }
    }
}

/// A generated media asset tied to a script.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedAsset {
    /// Unique asset ID
    pub id: String,

    /// Owning script
    pub script_id: ScriptId,

    /// Type-specific payload
    #[serde(flatten)]
    pub kind: AssetKind,

    /// Output file name
    pub file_name: String,

    /// Output file path
    pub file_path: String,

    /// Output file size in bytes
    pub file_size_bytes: u64,

    /// Generation status
    #[serde(default)]
    pub status: GenerationStatus,

    /// Error message (failed assets)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last status transition timestamp
    pub updated_at: DateTime<Utc>,
}

impl GeneratedAsset {
    /// Create an asset already in a terminal `Completed` state.
    pub fn completed(
        script_id: ScriptId,
        kind: AssetKind,
        file_path: impl Into<String>,
        file_size_bytes: u64,
    ) -> Self {
        let file_path = file_path.into();
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            script_id,
            kind,
            file_name: file_name_of(&file_path),
            file_path,
            file_size_bytes,
            status: GenerationStatus::Completed,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an asset in a terminal `Failed` state.
    pub fn failed(script_id: ScriptId, kind: AssetKind, error: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            script_id,
            kind,
            file_name: String::new(),
            file_path: String::new(),
            file_size_bytes: 0,
            status: GenerationStatus::Failed,
            error_message: Some(error.into()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an asset in `Processing` state, to be transitioned later.
    pub fn processing(
        script_id: ScriptId,
        kind: AssetKind,
        planned_path: impl Into<String>,
    ) -> Self {
        let file_path = planned_path.into();
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            script_id,
            kind,
            file_name: file_name_of(&file_path),
            file_path,
            file_size_bytes: 0,
            status: GenerationStatus::Processing,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}

fn file_name_of(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_union_serialization() {
        let asset = GeneratedAsset::completed(
            ScriptId::new(),
            AssetKind::Image {
                prompt: "neon skyline".to_string(),
                resolution: "1024x1792".to_string(),
                sequence_index: 2,
            },
            "/tmp/assets/img_2.png",
            2048,
        );

        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["asset_type"], "image");
        assert_eq!(json["sequence_index"], 2);
        assert_eq!(json["file_name"], "img_2.png");

        let back: GeneratedAsset = serde_json::from_value(json).unwrap();
        assert!(matches!(back.kind, AssetKind::Image { sequence_index: 2, .. }));
    }

    #[test]
    fn test_failed_asset_has_error() {
        let asset = GeneratedAsset::failed(
            ScriptId::new(),
            AssetKind::Voice {
                duration_seconds: 0.0,
                provider: "elevenlabs".to_string(),
                voice_id: "rachel".to_string(),
            },
            "provider timeout",
        );
        assert_eq!(asset.status, GenerationStatus::Failed);
        assert!(asset.status.is_terminal());
        assert_eq!(asset.error_message.as_deref(), Some("provider timeout"));
    }

    #[test]
    fn test_processing_asset_not_terminal() {
        let asset = GeneratedAsset::processing(
            ScriptId::new(),
            AssetKind::Video {
                resolution: "1080x1920".to_string(),
                duration_seconds: 0.0,
                codec: "h264".to_string(),
                fps: 30,
            },
            "/tmp/out/final.mp4",
        );
        assert_eq!(asset.status, GenerationStatus::Processing);
        assert!(!asset.status.is_terminal());
        assert_eq!(asset.file_name, "final.mp4");
    }

    #[test]
    fn test_type_labels() {
        let kind = AssetKind::Subtitle {
            format: "srt".to_string(),
            line_count: 12,
        };
        assert_eq!(kind.type_label(), "subtitle");
    }
}
