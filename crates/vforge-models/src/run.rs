//! Pipeline run reports and stage classification.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::ContentFormat;
use crate::ids::{ProjectId, RunId, VideoId};

/// The eight pipeline stages, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    /// Video + channel metadata fetch and viral scoring
    Metadata,
    /// Comment collection and sentiment analysis
    CommentAnalysis,
    /// Transcript summarization
    ContentSummary,
    /// Script generation
    ScriptGeneration,
    /// Image prompt + batch image generation
    ImageGeneration,
    /// Narration synthesis
    Narration,
    /// Subtitle generation
    Subtitles,
    /// Final video composition
    VideoComposition,
}

/// Whether a stage failure aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StageClassification {
    /// Failure aborts the run immediately
    Required,
    /// Failure or unmet precondition is recorded and the run continues
    Optional,
}

impl StageName {
    /// Canonical execution order.
    pub const ORDER: [StageName; 8] = [
        StageName::Metadata,
        StageName::CommentAnalysis,
        StageName::ContentSummary,
        StageName::ScriptGeneration,
        StageName::ImageGeneration,
        StageName::Narration,
        StageName::Subtitles,
        StageName::VideoComposition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Metadata => "metadata",
            StageName::CommentAnalysis => "comment_analysis",
            StageName::ContentSummary => "content_summary",
            StageName::ScriptGeneration => "script_generation",
            StageName::ImageGeneration => "image_generation",
            StageName::Narration => "narration",
            StageName::Subtitles => "subtitles",
            StageName::VideoComposition => "video_composition",
        }
    }

    /// Failure policy classification for this stage.
    pub fn classification(&self) -> StageClassification {
        match self {
            StageName::Metadata
            | StageName::CommentAnalysis
            | StageName::ScriptGeneration
            | StageName::Narration
            | StageName::Subtitles => StageClassification::Required,
            StageName::ContentSummary
            | StageName::ImageGeneration
            | StageName::VideoComposition => StageClassification::Optional,
        }
    }

    pub fn is_required(&self) -> bool {
        self.classification() == StageClassification::Required
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one stage within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage executed and persisted its artifact
    Completed,
    /// Stage did not execute (unmet precondition or user skip)
    Skipped,
    /// Stage executed and failed
    Failed,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Completed => "completed",
            StageStatus::Skipped => "skipped",
            StageStatus::Failed => "failed",
        }
    }
}

/// Per-stage entry in the run report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StageReport {
    /// Stage name
    pub stage: StageName,

    /// Outcome
    pub status: StageStatus,

    /// Stage-specific summary payload (counts, durations, paths)
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub summary: serde_json::Value,

    /// Skip reason or failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StageReport {
    pub fn completed(stage: StageName, summary: serde_json::Value) -> Self {
        Self {
            stage,
            status: StageStatus::Completed,
            summary,
            reason: None,
        }
    }

    pub fn skipped(stage: StageName, reason: impl Into<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Skipped,
            summary: serde_json::Value::Null,
            reason: Some(reason.into()),
        }
    }

    pub fn failed(stage: StageName, reason: impl Into<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Failed,
            summary: serde_json::Value::Null,
            reason: Some(reason.into()),
        }
    }
}

/// Overall run outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
}

/// Report of one end-to-end pipeline execution.
///
/// Built incrementally as stages execute. A run that aborts on a
/// required stage still carries the entries accumulated up to and
/// including the failing stage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PipelineRun {
    /// Unique run ID
    pub run_id: RunId,

    /// Project the run belongs to
    pub project_id: ProjectId,

    /// Target source video ID
    pub video_id: String,

    /// Format the run targeted
    pub format: ContentFormat,

    /// Per-stage results, in execution order
    pub stages: Vec<StageReport>,

    /// Overall status
    pub status: RunStatus,

    /// Triggering error message for failed runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Completion timestamp (set at run end, success or failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl PipelineRun {
    /// Start an empty report for a run.
    pub fn begin(project_id: ProjectId, video_id: impl Into<String>, format: ContentFormat) -> Self {
        Self {
            run_id: RunId::new(),
            project_id,
            video_id: video_id.into(),
            format,
            stages: Vec::with_capacity(StageName::ORDER.len()),
            status: RunStatus::Completed,
            error: None,
            completed_at: None,
        }
    }

    /// Append a stage entry.
    pub fn record(&mut self, report: StageReport) {
        self.stages.push(report);
    }

    /// Look up the entry for a stage, if it was reached.
    pub fn stage(&self, name: StageName) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == name)
    }

    /// Close the report as failed with the triggering error.
    pub fn finish_failed(&mut self, error: impl Into<String>) {
        self.status = RunStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
    }

    /// Close the report as completed.
    pub fn finish_completed(&mut self) {
        self.status = RunStatus::Completed;
        self.completed_at = Some(Utc::now());
    }
}
