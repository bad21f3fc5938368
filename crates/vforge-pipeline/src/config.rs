//! Pipeline configuration.

use std::time::Duration;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum concurrent image generations within one run
    pub image_concurrency: usize,
    /// Deadline for narration synthesis
    pub narration_deadline: Duration,
    /// Deadline for final video composition
    pub composition_deadline: Duration,
    /// Directory where composed video files are planned
    pub asset_dir: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            image_concurrency: 4,
            narration_deadline: Duration::from_secs(120),
            composition_deadline: Duration::from_secs(300),
            asset_dir: "/tmp/vforge".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            image_concurrency: std::env::var("VFORGE_IMAGE_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
            narration_deadline: Duration::from_secs(
                std::env::var("VFORGE_NARRATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            composition_deadline: Duration::from_secs(
                std::env::var("VFORGE_COMPOSITION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            asset_dir: std::env::var("VFORGE_ASSET_DIR")
                .unwrap_or_else(|_| "/tmp/vforge".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.image_concurrency, 4);
        assert_eq!(config.narration_deadline, Duration::from_secs(120));
        assert_eq!(config.composition_deadline, Duration::from_secs(300));
    }
}
