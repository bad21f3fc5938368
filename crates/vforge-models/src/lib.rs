//! Shared data models for the ViralForge backend.
//!
//! This crate provides Serde-serializable types for:
//! - Projects and scored videos
//! - Per-stage pipeline artifacts (analyses, summaries, scripts, assets)
//! - Pipeline run reports and stage classification

pub mod analysis;
pub mod asset;
pub mod format;
pub mod ids;
pub mod project;
pub mod run;
pub mod script;
pub mod summary;
pub mod video;

// Re-export common types
pub use analysis::CommentAnalysis;
pub use asset::{AssetKind, GeneratedAsset, GenerationStatus};
pub use format::{ContentFormat, FormatParseError};
pub use ids::{ProjectId, RunId, ScriptId, VideoId};
pub use project::{Project, ProjectStatus};
pub use run::{
    RunStatus, StageClassification, StageName, StageReport, StageStatus, PipelineRun,
};
pub use script::{ScriptArtifact, ScriptSections};
pub use summary::{ContentSummary, SummaryDepth};
pub use video::{ScoredVideo, ViralGrade};
