//! Project models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::ContentFormat;
use crate::ids::ProjectId;

/// Project lifecycle status.
///
/// Transitions pending -> processing -> (completed | failed). Only the
/// pipeline coordinator moves a project out of `Pending`, and it sets a
/// terminal value exactly once, at run end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Created, no run started yet
    #[default]
    Pending,
    /// A pipeline run is in flight
    Processing,
    /// Last run finished successfully
    Completed,
    /// Last run aborted on a required stage
    Failed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Processing => "processing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Failed)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A content-automation project.
///
/// One project groups the scored videos produced for a single search
/// keyword and target format.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    /// Unique project ID
    pub id: ProjectId,

    /// Operator-facing display name
    pub name: String,

    /// Search keyword the project was created for
    pub keyword: String,

    /// Target content format
    pub format: ContentFormat,

    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,

    /// Error message from the last failed run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new pending project.
    pub fn new(
        name: impl Into<String>,
        keyword: impl Into<String>,
        format: ContentFormat,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            name: name.into(),
            keyword: keyword.into(),
            format,
            status: ProjectStatus::Pending,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the project as processing (run start).
    pub fn begin_processing(mut self) -> Self {
        self.status = ProjectStatus::Processing;
        self.updated_at = Utc::now();
        self
    }

    /// Mark the project as completed (run end).
    pub fn complete(mut self) -> Self {
        self.status = ProjectStatus::Completed;
        self.error_message = None;
        self.updated_at = Utc::now();
        self
    }

    /// Mark the project as failed (run end), recording the trigger.
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        self.status = ProjectStatus::Failed;
        self.error_message = Some(error.into());
        self.updated_at = Utc::now();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_starts_pending() {
        let project = Project::new("Cooking Shorts", "air fryer", ContentFormat::Short);
        assert_eq!(project.status, ProjectStatus::Pending);
        assert!(project.error_message.is_none());
    }

    #[test]
    fn test_project_transitions() {
        let project = Project::new("p", "k", ContentFormat::Long).begin_processing();
        assert_eq!(project.status, ProjectStatus::Processing);
        assert!(!project.status.is_terminal());

        let failed = project.clone().fail("sentiment analysis unavailable");
        assert_eq!(failed.status, ProjectStatus::Failed);
        assert!(failed.status.is_terminal());
        assert_eq!(
            failed.error_message.as_deref(),
            Some("sentiment analysis unavailable")
        );

        let completed = project.complete();
        assert_eq!(completed.status, ProjectStatus::Completed);
        assert!(completed.error_message.is_none());
    }
}
