//! Store handle and schema initialization.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

use crate::error::StoreResult;
use crate::repos::{
    AnalysisRepo, AssetRepo, ProjectRepo, ScoredVideoRepo, ScriptRepo, SummaryRepo,
};

/// Explicitly constructed handle over the artifact database.
///
/// Built once at startup and injected into the coordinator; there is no
/// lazily-initialized global pool. All repositories clone the shared
/// pool, so concurrent runs write through the same handle.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pool: SqlitePool,
}

impl ArtifactStore {
    /// Open (creating if needed) a database at the given path.
    pub async fn connect(db_path: &Path) -> StoreResult<Self> {
        let newly_created = !db_path.exists();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                sqlx::Error::Io(e)
            })?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(&db_url)
            .await?;

        sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
        // WAL allows concurrent readers alongside one writer, which is
        // what concurrent runs over independent rows need.
        sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
        sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

        create_schema(&pool).await?;

        if newly_created {
            info!("Initialized new artifact store: {}", db_path.display());
        } else {
            info!("Opened artifact store: {}", db_path.display());
        }

        Ok(Self { pool })
    }

    /// Open an in-memory database.
    ///
    /// A single pooled connection that never expires, so the whole test
    /// sees one database instead of one per checkout.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
        create_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Explicit teardown; waits for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn projects(&self) -> ProjectRepo {
        ProjectRepo::new(self.pool.clone())
    }

    pub fn videos(&self) -> ScoredVideoRepo {
        ScoredVideoRepo::new(self.pool.clone())
    }

    pub fn analyses(&self) -> AnalysisRepo {
        AnalysisRepo::new(self.pool.clone())
    }

    pub fn summaries(&self) -> SummaryRepo {
        SummaryRepo::new(self.pool.clone())
    }

    pub fn scripts(&self) -> ScriptRepo {
        ScriptRepo::new(self.pool.clone())
    }

    pub fn assets(&self) -> AssetRepo {
        AssetRepo::new(self.pool.clone())
    }
}

/// Idempotent schema creation.
async fn create_schema(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            keyword TEXT NOT NULL,
            format TEXT NOT NULL,
            status TEXT NOT NULL,
            error_message TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS scored_videos (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id),
            source_video_id TEXT NOT NULL,
            title TEXT NOT NULL,
            channel_id TEXT NOT NULL,
            channel_name TEXT NOT NULL,
            subscriber_count INTEGER NOT NULL,
            view_count INTEGER NOT NULL,
            like_count INTEGER NOT NULL DEFAULT 0,
            comment_count INTEGER NOT NULL DEFAULT 0,
            duration_seconds INTEGER NOT NULL,
            published_at TEXT NOT NULL,
            thumbnail_url TEXT,
            format TEXT NOT NULL,
            viral_score REAL NOT NULL,
            viral_grade TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_scored_videos_project
            ON scored_videos(project_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS comment_analyses (
            id TEXT PRIMARY KEY,
            video_id TEXT NOT NULL REFERENCES scored_videos(id),
            total_comments INTEGER NOT NULL,
            positive_count INTEGER NOT NULL,
            negative_count INTEGER NOT NULL,
            positive_summary TEXT NOT NULL,
            negative_summary TEXT NOT NULL,
            keywords TEXT NOT NULL,
            improvement_suggestions TEXT NOT NULL,
            raw_payload TEXT NOT NULL,
            model TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_comment_analyses_video
            ON comment_analyses(video_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS content_summaries (
            id TEXT PRIMARY KEY,
            video_id TEXT NOT NULL REFERENCES scored_videos(id),
            transcript TEXT,
            one_line_summary TEXT NOT NULL,
            detailed_summary TEXT NOT NULL,
            key_points TEXT NOT NULL,
            depth TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_content_summaries_video
            ON content_summaries(video_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS scripts (
            id TEXT PRIMARY KEY,
            video_id TEXT NOT NULL REFERENCES scored_videos(id),
            purpose TEXT NOT NULL,
            target_audience TEXT,
            expected_duration_seconds REAL NOT NULL,
            sections TEXT NOT NULL,
            full_text TEXT NOT NULL,
            format TEXT NOT NULL,
            word_count INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_scripts_video ON scripts(video_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS generated_assets (
            id TEXT PRIMARY KEY,
            script_id TEXT NOT NULL REFERENCES scripts(id),
            asset_type TEXT NOT NULL,
            kind_json TEXT NOT NULL,
            file_name TEXT NOT NULL,
            file_path TEXT NOT NULL,
            file_size_bytes INTEGER NOT NULL,
            status TEXT NOT NULL,
            error_message TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_generated_assets_script
            ON generated_assets(script_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
