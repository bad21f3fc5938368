//! Collaborator wiring handed to the coordinator.

use std::sync::Arc;

use vforge_providers::{
    ChannelMetadataProvider, CommentCollector, ImageGenerator, ImagePromptGenerator,
    NarrationSynthesizer, ScriptGenerator, SentimentAnalyzer, SubtitleGenerator,
    SubtitlePersister, Summarizer, VideoCompositor, VideoMetadataProvider,
};

/// The full set of collaborators one coordinator drives.
///
/// Everything is behind `Arc<dyn _>` so a set is cheap to clone and
/// one adapter instance can serve concurrent runs.
#[derive(Clone)]
pub struct ProviderSet {
    pub video_metadata: Arc<dyn VideoMetadataProvider>,
    pub channel_metadata: Arc<dyn ChannelMetadataProvider>,
    pub comment_collector: Arc<dyn CommentCollector>,
    pub sentiment_analyzer: Arc<dyn SentimentAnalyzer>,
    pub summarizer: Arc<dyn Summarizer>,
    pub script_generator: Arc<dyn ScriptGenerator>,
    pub image_prompt_generator: Arc<dyn ImagePromptGenerator>,
    pub image_generator: Arc<dyn ImageGenerator>,
    pub narration_synthesizer: Arc<dyn NarrationSynthesizer>,
    pub subtitle_generator: Arc<dyn SubtitleGenerator>,
    pub subtitle_persister: Arc<dyn SubtitlePersister>,
    pub video_compositor: Arc<dyn VideoCompositor>,
}

impl std::fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSet").finish_non_exhaustive()
    }
}
