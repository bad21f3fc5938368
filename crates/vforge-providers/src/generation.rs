//! Content generation seams: scripts, images, narration, subtitles.

use async_trait::async_trait;

use vforge_models::ContentFormat;

use crate::error::ProviderResult;
use crate::types::{
    GeneratedScript, ImageFile, NarrationAudio, SentimentReport, SubtitleDoc, SubtitleFile,
};

/// Generates a structured narration script.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Generate a script from a content summary and the audience
    /// signals mined from comments.
    async fn generate(
        &self,
        summary: &str,
        sentiment: &SentimentReport,
        format: ContentFormat,
        target_audience: Option<&str>,
    ) -> ProviderResult<GeneratedScript>;
}

/// Derives image prompts from a script.
#[async_trait]
pub trait ImagePromptGenerator: Send + Sync {
    async fn prompts(&self, script: &str, format: ContentFormat) -> ProviderResult<Vec<String>>;
}

/// Generates a single image from a prompt.
///
/// The pipeline owns batching: it fans prompts out concurrently under
/// its own bound and accumulates per-item outcomes, so one failed image
/// never fails the batch.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(
        &self,
        script: &str,
        prompt: &str,
        index: u32,
        format: ContentFormat,
    ) -> ProviderResult<ImageFile>;
}

/// Synthesizes narration audio from a full script.
#[async_trait]
pub trait NarrationSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        script: &str,
        format: ContentFormat,
    ) -> ProviderResult<NarrationAudio>;
}

/// Generates subtitles timed against a known narration duration.
#[async_trait]
pub trait SubtitleGenerator: Send + Sync {
    async fn generate(
        &self,
        script: &str,
        narration_duration_seconds: f64,
        format: ContentFormat,
    ) -> ProviderResult<SubtitleDoc>;
}

/// Persists a subtitle document to durable file storage.
#[async_trait]
pub trait SubtitlePersister: Send + Sync {
    async fn persist(&self, doc: &SubtitleDoc, video_id: &str) -> ProviderResult<SubtitleFile>;
}
