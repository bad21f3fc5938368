//! Source platform metadata providers.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::{ChannelInfo, VideoInfo};

/// Batch lookup of video metadata on the source platform.
#[async_trait]
pub trait VideoMetadataProvider: Send + Sync {
    /// Fetch metadata for the given source video IDs.
    ///
    /// Unknown IDs are simply absent from the result; callers decide
    /// whether absence is an error.
    async fn fetch_videos(&self, ids: &[String]) -> ProviderResult<Vec<VideoInfo>>;
}

/// Batch lookup of channel metadata on the source platform.
#[async_trait]
pub trait ChannelMetadataProvider: Send + Sync {
    /// Fetch metadata for the given channel IDs.
    async fn fetch_channels(&self, ids: &[String]) -> ProviderResult<Vec<ChannelInfo>>;
}
