//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};
use tracing_subscriber::EnvFilter;

use vforge_models::{ProjectId, RunId, StageName};

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `info`. Safe to call more than once
/// (later calls are no-ops), which keeps test binaries happy.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Run logger for structured logging with consistent formatting.
///
/// Attaches the run and project IDs to every line so one run's
/// lifecycle can be followed through interleaved concurrent runs.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    project_id: String,
}

impl RunLogger {
    pub fn new(run_id: &RunId, project_id: &ProjectId) -> Self {
        Self {
            run_id: run_id.to_string(),
            project_id: project_id.to_string(),
        }
    }

    /// Log the start of a run.
    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            project_id = %self.project_id,
            "Run started: {}", message
        );
    }

    /// Log a stage-level event.
    pub fn log_stage(&self, stage: StageName, message: &str) {
        info!(
            run_id = %self.run_id,
            project_id = %self.project_id,
            stage = %stage,
            "{}", message
        );
    }

    /// Log a warning during the run.
    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            project_id = %self.project_id,
            "Run warning: {}", message
        );
    }

    /// Log an error during the run.
    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            project_id = %self.project_id,
            "Run error: {}", message
        );
    }

    /// Log the completion of a run.
    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            project_id = %self.project_id,
            "Run completed: {}", message
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Create a tracing span for this run.
    ///
    /// The coordinator instruments each stage's execution with this
    /// span so collaborator log lines inherit the run context.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "pipeline_run",
            run_id = %self.run_id,
            project_id = %self.project_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_logger_creation() {
        let run_id = RunId::new();
        let project_id = ProjectId::new();
        let logger = RunLogger::new(&run_id, &project_id);

        assert_eq!(logger.run_id(), run_id.to_string());
    }

    #[test]
    fn test_create_span_is_enabled_under_subscriber() {
        let subscriber = tracing_subscriber::fmt().finish();
        tracing::subscriber::with_default(subscriber, || {
            let logger = RunLogger::new(&RunId::new(), &ProjectId::new());
            assert!(!logger.create_span().is_disabled());
        });
    }
}
