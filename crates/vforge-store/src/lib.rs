//! Append-only artifact store backed by SQLite.
//!
//! `ArtifactStore` owns the connection pool and hands out typed
//! repositories, one per artifact table. Artifacts are insert-only;
//! the sole sanctioned mutation after creation is a generated asset's
//! status transition (see [`repos::AssetRepo::update_status`]).

pub mod error;
pub mod repos;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use repos::{
    AnalysisRepo, AssetRepo, ProjectRepo, ScoredVideoRepo, ScriptRepo, SummaryRepo,
};
pub use store::ArtifactStore;
