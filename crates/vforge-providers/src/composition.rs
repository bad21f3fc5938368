//! Video composition seam.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::CompositionOutput;

/// Composites images, narration and subtitles into a final video.
#[async_trait]
pub trait VideoCompositor: Send + Sync {
    /// Whether the underlying compositor binary is available.
    async fn check_installation(&self) -> bool;

    /// Compose the final video from surviving images, narration audio
    /// and a persisted subtitle file.
    async fn compose(
        &self,
        image_paths: &[String],
        audio_path: &str,
        subtitle_path: &str,
    ) -> ProviderResult<CompositionOutput>;
}
