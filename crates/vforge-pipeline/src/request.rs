//! Pipeline run request envelope.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use vforge_models::{ContentFormat, ProjectId};

use crate::error::{PipelineError, PipelineResult};

/// Everything the coordinator needs to run one video through the
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PipelineRequest {
    /// Owning project
    pub project_id: ProjectId,

    /// Source platform video ID
    pub video_id: String,

    /// Target content format
    pub format: ContentFormat,

    /// Audience hint passed to the script generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,

    /// Source video transcript; summarization is skipped without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    /// Skip image generation entirely
    #[serde(default)]
    pub skip_image_generation: bool,

    /// Skip final video composition entirely
    #[serde(default)]
    pub skip_video_generation: bool,
}

impl PipelineRequest {
    pub fn new(
        project_id: ProjectId,
        video_id: impl Into<String>,
        format: ContentFormat,
    ) -> Self {
        Self {
            project_id,
            video_id: video_id.into(),
            format,
            target_audience: None,
            transcript: None,
            skip_image_generation: false,
            skip_video_generation: false,
        }
    }

    /// Reject requests that cannot identify a project and a video.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.project_id.is_empty() {
            return Err(PipelineError::validation("project_id must not be empty"));
        }
        if self.video_id.trim().is_empty() {
            return Err(PipelineError::validation("video_id must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = PipelineRequest::new(ProjectId::new(), "abc123", ContentFormat::Short);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_video_id_rejected() {
        let request = PipelineRequest::new(ProjectId::new(), "   ", ContentFormat::Short);
        let err = request.validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_project_id_rejected() {
        let request =
            PipelineRequest::new(ProjectId::from_string(""), "abc123", ContentFormat::Long);
        assert!(request.validate().unwrap_err().is_validation());
    }
}
