//! Scored video models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::ContentFormat;
use crate::ids::{ProjectId, VideoId};

/// Letter-bucketed viral classification, `S` highest to `D` lowest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum ViralGrade {
    S,
    A,
    B,
    C,
    D,
}

impl ViralGrade {
    /// Grades from highest to lowest band.
    pub const ORDER: [ViralGrade; 5] = [
        ViralGrade::S,
        ViralGrade::A,
        ViralGrade::B,
        ViralGrade::C,
        ViralGrade::D,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViralGrade::S => "S",
            ViralGrade::A => "A",
            ViralGrade::B => "B",
            ViralGrade::C => "C",
            ViralGrade::D => "D",
        }
    }

    /// Parse a stored grade letter.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "S" => Some(ViralGrade::S),
            "A" => Some(ViralGrade::A),
            "B" => Some(ViralGrade::B),
            "C" => Some(ViralGrade::C),
            "D" => Some(ViralGrade::D),
            _ => None,
        }
    }
}

impl fmt::Display for ViralGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A source video scored for viral potential.
///
/// Created once per pipeline run at the metadata stage and immutable
/// thereafter; re-running the pipeline inserts a new row rather than
/// mutating history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoredVideo {
    /// Unique row ID
    pub id: VideoId,

    /// Owning project
    pub project_id: ProjectId,

    /// Source platform video ID
    pub source_video_id: String,

    /// Video title
    pub title: String,

    /// Channel ID
    pub channel_id: String,

    /// Channel display name
    pub channel_name: String,

    /// Channel subscriber count at scoring time
    pub subscriber_count: u64,

    /// View count at scoring time
    pub view_count: u64,

    /// Like count at scoring time
    #[serde(default)]
    pub like_count: u64,

    /// Comment count at scoring time
    #[serde(default)]
    pub comment_count: u64,

    /// Video duration in seconds
    pub duration_seconds: u32,

    /// Publish timestamp on the source platform
    pub published_at: DateTime<Utc>,

    /// Thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Format the video was scored against
    pub format: ContentFormat,

    /// Computed viral score
    pub viral_score: f64,

    /// Letter grade derived from the score
    pub viral_grade: ViralGrade,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ScoredVideo {
    /// Views per subscriber, with the zero-subscriber floor applied.
    pub fn reach_ratio(&self) -> f64 {
        self.view_count as f64 / self.subscriber_count.max(1) as f64
    }

    /// True for the grades operators shortlist for generation.
    pub fn is_viral(&self) -> bool {
        matches!(self.viral_grade, ViralGrade::S | ViralGrade::A)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScoredVideo {
        ScoredVideo {
            id: VideoId::new(),
            project_id: ProjectId::new(),
            source_video_id: "dQw4w9WgXcQ".to_string(),
            title: "Test".to_string(),
            channel_id: "UC123".to_string(),
            channel_name: "Channel".to_string(),
            subscriber_count: 0,
            view_count: 100,
            like_count: 10,
            comment_count: 2,
            duration_seconds: 58,
            published_at: Utc::now(),
            thumbnail_url: None,
            format: ContentFormat::Short,
            viral_score: 12.5,
            viral_grade: ViralGrade::B,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reach_ratio_zero_subscribers() {
        let video = sample();
        assert!(video.reach_ratio().is_finite());
        assert_eq!(video.reach_ratio(), 100.0);
    }

    #[test]
    fn test_grade_ordering() {
        assert!(ViralGrade::S < ViralGrade::D);
        assert_eq!(ViralGrade::ORDER[0], ViralGrade::S);
        assert_eq!(ViralGrade::ORDER[4], ViralGrade::D);
    }

    #[test]
    fn test_grade_letter_roundtrip() {
        for grade in ViralGrade::ORDER {
            assert_eq!(ViralGrade::from_letter(grade.as_str()), Some(grade));
        }
        assert_eq!(ViralGrade::from_letter("F"), None);
    }

    #[test]
    fn test_is_viral() {
        let mut video = sample();
        video.viral_grade = ViralGrade::A;
        assert!(video.is_viral());
        video.viral_grade = ViralGrade::C;
        assert!(!video.is_viral());
    }
}
