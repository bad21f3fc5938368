//! Content-generation pipeline coordinator.
//!
//! Takes a validated [`PipelineRequest`], drives the eight stages in
//! order (metadata/scoring, comment analysis, summarization, script,
//! images, narration, subtitles, composition) against the collaborator
//! set, and persists one artifact per executed stage in the artifact
//! store. Required stages abort the run on failure; optional stages
//! are recorded and skipped past.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod images;
pub mod logging;
pub mod providers;
pub mod request;

pub use config::PipelineConfig;
pub use coordinator::PipelineCoordinator;
pub use error::{PipelineError, PipelineResult};
pub use logging::{init_logging, RunLogger};
pub use providers::ProviderSet;
pub use request::PipelineRequest;
