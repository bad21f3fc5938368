//! Collaborator interfaces consumed by the pipeline coordinator.
//!
//! Each external AI/media service sits behind a narrow `async_trait`
//! boundary here; the coordinator drives these traits and never sees a
//! concrete adapter. Implementations live outside this workspace (HTTP
//! adapters, FFmpeg wrappers); tests use hand-written fakes.

pub mod analysis;
pub mod composition;
pub mod error;
pub mod generation;
pub mod metadata;
pub mod types;

pub use analysis::{CommentCollector, SentimentAnalyzer, Summarizer};
pub use composition::VideoCompositor;
pub use error::{ProviderError, ProviderResult};
pub use generation::{
    ImageGenerator, ImagePromptGenerator, NarrationSynthesizer, ScriptGenerator,
    SubtitleGenerator, SubtitlePersister,
};
pub use metadata::{ChannelMetadataProvider, VideoMetadataProvider};
pub use types::{
    ChannelInfo, Comment, CompositionOutput, GeneratedScript, ImageFile, NarrationAudio,
    SentimentReport, SubtitleDoc, SubtitleFile, SummaryReport, VideoInfo,
};
