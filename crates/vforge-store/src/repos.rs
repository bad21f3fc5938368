//! Typed repositories over the artifact tables.
//!
//! Insert operations are append-only: every row gets a fresh UUID key
//! and nothing ever upserts, so re-running a pipeline leaves earlier
//! runs' artifacts untouched. `AssetRepo` carries the one sanctioned
//! post-creation mutation (generation status transitions). Structured
//! sub-objects (keywords, key points, section maps, raw payloads) are
//! serialized to JSON text columns here and nowhere else.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use vforge_models::{
    AssetKind, CommentAnalysis, ContentFormat, ContentSummary, GeneratedAsset, GenerationStatus,
    Project, ProjectId, ProjectStatus, ScoredVideo, ScriptArtifact, ScriptId, ScriptSections,
    SummaryDepth, VideoId, ViralGrade,
};

use crate::error::{StoreError, StoreResult};

fn project_status_from_str(s: &str) -> StoreResult<ProjectStatus> {
    match s {
        "pending" => Ok(ProjectStatus::Pending),
        "processing" => Ok(ProjectStatus::Processing),
        "completed" => Ok(ProjectStatus::Completed),
        "failed" => Ok(ProjectStatus::Failed),
        other => Err(StoreError::invalid_value(format!("project status {other}"))),
    }
}

fn generation_status_from_str(s: &str) -> StoreResult<GenerationStatus> {
    match s {
        "pending" => Ok(GenerationStatus::Pending),
        "processing" => Ok(GenerationStatus::Processing),
        "completed" => Ok(GenerationStatus::Completed),
        "failed" => Ok(GenerationStatus::Failed),
        other => Err(StoreError::invalid_value(format!("generation status {other}"))),
    }
}

fn summary_depth_from_str(s: &str) -> StoreResult<SummaryDepth> {
    match s {
        "brief" => Ok(SummaryDepth::Brief),
        "standard" => Ok(SummaryDepth::Standard),
        "deep" => Ok(SummaryDepth::Deep),
        other => Err(StoreError::invalid_value(format!("summary depth {other}"))),
    }
}

fn format_from_str(s: &str) -> StoreResult<ContentFormat> {
    s.parse::<ContentFormat>()
        .map_err(|e| StoreError::invalid_value(e.to_string()))
}

fn grade_from_str(s: &str) -> StoreResult<ViralGrade> {
    ViralGrade::from_letter(s)
        .ok_or_else(|| StoreError::invalid_value(format!("viral grade {s}")))
}

fn u64_col(row: &SqliteRow, col: &str) -> StoreResult<u64> {
    let v: i64 = row.try_get(col)?;
    Ok(v.max(0) as u64)
}

/// Repository for project rows.
#[derive(Debug, Clone)]
pub struct ProjectRepo {
    pool: SqlitePool,
}

impl ProjectRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new project record.
    pub async fn create(&self, project: &Project) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO projects
                (id, name, keyword, format, status, error_message, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(project.id.as_str())
        .bind(&project.name)
        .bind(&project.keyword)
        .bind(project.format.as_str())
        .bind(project.status.as_str())
        .bind(&project.error_message)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;
        info!(project_id = %project.id, "Created project record");
        Ok(())
    }

    /// Get a project by ID.
    pub async fn get(&self, id: &ProjectId) -> StoreResult<Option<Project>> {
        let row = sqlx::query("SELECT * FROM projects WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_project(&r)).transpose()
    }

    /// Update project status.
    pub async fn update_status(&self, id: &ProjectId, status: ProjectStatus) -> StoreResult<()> {
        let result = sqlx::query("UPDATE projects SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("project {id}")));
        }
        Ok(())
    }

    /// Mark a project completed, clearing any stale error.
    pub async fn complete(&self, id: &ProjectId) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE projects SET status = ?, error_message = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(ProjectStatus::Completed.as_str())
        .bind(Utc::now())
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("project {id}")));
        }
        Ok(())
    }

    /// Mark a project failed, recording the triggering error.
    pub async fn fail(&self, id: &ProjectId, error: &str) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE projects SET status = ?, error_message = ?, updated_at = ? WHERE id = ?",
        )
        .bind(ProjectStatus::Failed.as_str())
        .bind(error)
        .bind(Utc::now())
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("project {id}")));
        }
        Ok(())
    }
}

fn row_to_project(row: &SqliteRow) -> StoreResult<Project> {
    let status: String = row.try_get("status")?;
    let format: String = row.try_get("format")?;
    Ok(Project {
        id: ProjectId::from_string(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
        keyword: row.try_get("keyword")?,
        format: format_from_str(&format)?,
        status: project_status_from_str(&status)?,
        error_message: row.try_get("error_message")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

/// Repository for scored video rows.
#[derive(Debug, Clone)]
pub struct ScoredVideoRepo {
    pool: SqlitePool,
}

impl ScoredVideoRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a scored video row (append-only; one per run).
    pub async fn insert(&self, video: &ScoredVideo) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO scored_videos
                (id, project_id, source_video_id, title, channel_id, channel_name,
                 subscriber_count, view_count, like_count, comment_count,
                 duration_seconds, published_at, thumbnail_url, format,
                 viral_score, viral_grade, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(video.id.as_str())
        .bind(video.project_id.as_str())
        .bind(&video.source_video_id)
        .bind(&video.title)
        .bind(&video.channel_id)
        .bind(&video.channel_name)
        .bind(video.subscriber_count as i64)
        .bind(video.view_count as i64)
        .bind(video.like_count as i64)
        .bind(video.comment_count as i64)
        .bind(video.duration_seconds as i64)
        .bind(video.published_at)
        .bind(&video.thumbnail_url)
        .bind(video.format.as_str())
        .bind(video.viral_score)
        .bind(video.viral_grade.as_str())
        .bind(video.created_at)
        .execute(&self.pool)
        .await?;
        info!(video_id = %video.id, grade = %video.viral_grade, "Inserted scored video");
        Ok(())
    }

    /// Get a scored video row by ID.
    pub async fn get(&self, id: &VideoId) -> StoreResult<Option<ScoredVideo>> {
        let row = sqlx::query("SELECT * FROM scored_videos WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_scored_video(&r)).transpose()
    }

    /// List all scored videos of a project, newest first.
    pub async fn list_for_project(&self, project_id: &ProjectId) -> StoreResult<Vec<ScoredVideo>> {
        let rows = sqlx::query(
            "SELECT * FROM scored_videos WHERE project_id = ? ORDER BY created_at DESC",
        )
        .bind(project_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_scored_video).collect()
    }
}

fn row_to_scored_video(row: &SqliteRow) -> StoreResult<ScoredVideo> {
    let format: String = row.try_get("format")?;
    let grade: String = row.try_get("viral_grade")?;
    Ok(ScoredVideo {
        id: VideoId::from_string(row.try_get::<String, _>("id")?),
        project_id: ProjectId::from_string(row.try_get::<String, _>("project_id")?),
        source_video_id: row.try_get("source_video_id")?,
        title: row.try_get("title")?,
        channel_id: row.try_get("channel_id")?,
        channel_name: row.try_get("channel_name")?,
        subscriber_count: u64_col(row, "subscriber_count")?,
        view_count: u64_col(row, "view_count")?,
        like_count: u64_col(row, "like_count")?,
        comment_count: u64_col(row, "comment_count")?,
        duration_seconds: row.try_get::<i64, _>("duration_seconds")?.max(0) as u32,
        published_at: row.try_get::<DateTime<Utc>, _>("published_at")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        format: format_from_str(&format)?,
        viral_score: row.try_get("viral_score")?,
        viral_grade: grade_from_str(&grade)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Repository for comment analysis rows.
#[derive(Debug, Clone)]
pub struct AnalysisRepo {
    pool: SqlitePool,
}

impl AnalysisRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a comment analysis row (append-only).
    pub async fn insert(&self, analysis: &CommentAnalysis) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO comment_analyses
                (id, video_id, total_comments, positive_count, negative_count,
                 positive_summary, negative_summary, keywords,
                 improvement_suggestions, raw_payload, model, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&analysis.id)
        .bind(analysis.video_id.as_str())
        .bind(analysis.total_comments)
        .bind(analysis.positive_count)
        .bind(analysis.negative_count)
        .bind(&analysis.positive_summary)
        .bind(&analysis.negative_summary)
        .bind(serde_json::to_string(&analysis.keywords)?)
        .bind(serde_json::to_string(&analysis.improvement_suggestions)?)
        .bind(serde_json::to_string(&analysis.raw_payload)?)
        .bind(&analysis.model)
        .bind(analysis.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// List analyses for a scored video, newest first.
    pub async fn list_for_video(&self, video_id: &VideoId) -> StoreResult<Vec<CommentAnalysis>> {
        let rows = sqlx::query(
            "SELECT * FROM comment_analyses WHERE video_id = ? ORDER BY created_at DESC",
        )
        .bind(video_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_analysis).collect()
    }
}

fn row_to_analysis(row: &SqliteRow) -> StoreResult<CommentAnalysis> {
    let keywords: String = row.try_get("keywords")?;
    let suggestions: String = row.try_get("improvement_suggestions")?;
    let raw: String = row.try_get("raw_payload")?;
    Ok(CommentAnalysis {
        id: row.try_get("id")?,
        video_id: VideoId::from_string(row.try_get::<String, _>("video_id")?),
        total_comments: row.try_get::<i64, _>("total_comments")?.max(0) as u32,
        positive_count: row.try_get::<i64, _>("positive_count")?.max(0) as u32,
        negative_count: row.try_get::<i64, _>("negative_count")?.max(0) as u32,
        positive_summary: row.try_get("positive_summary")?,
        negative_summary: row.try_get("negative_summary")?,
        keywords: serde_json::from_str(&keywords)?,
        improvement_suggestions: serde_json::from_str(&suggestions)?,
        raw_payload: serde_json::from_str(&raw)?,
        model: row.try_get("model")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Repository for content summary rows.
#[derive(Debug, Clone)]
pub struct SummaryRepo {
    pool: SqlitePool,
}

impl SummaryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a content summary row (append-only).
    pub async fn insert(&self, summary: &ContentSummary) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO content_summaries
                (id, video_id, transcript, one_line_summary, detailed_summary,
                 key_points, depth, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&summary.id)
        .bind(summary.video_id.as_str())
        .bind(&summary.transcript)
        .bind(&summary.one_line_summary)
        .bind(&summary.detailed_summary)
        .bind(serde_json::to_string(&summary.key_points)?)
        .bind(summary.depth.as_str())
        .bind(summary.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// List summaries for a scored video, newest first.
    pub async fn list_for_video(&self, video_id: &VideoId) -> StoreResult<Vec<ContentSummary>> {
        let rows = sqlx::query(
            "SELECT * FROM content_summaries WHERE video_id = ? ORDER BY created_at DESC",
        )
        .bind(video_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_summary).collect()
    }
}

fn row_to_summary(row: &SqliteRow) -> StoreResult<ContentSummary> {
    let key_points: String = row.try_get("key_points")?;
    let depth: String = row.try_get("depth")?;
    Ok(ContentSummary {
        id: row.try_get("id")?,
        video_id: VideoId::from_string(row.try_get::<String, _>("video_id")?),
        transcript: row.try_get("transcript")?,
        one_line_summary: row.try_get("one_line_summary")?,
        detailed_summary: row.try_get("detailed_summary")?,
        key_points: serde_json::from_str(&key_points)?,
        depth: summary_depth_from_str(&depth)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Repository for script rows.
#[derive(Debug, Clone)]
pub struct ScriptRepo {
    pool: SqlitePool,
}

impl ScriptRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a script row (append-only).
    pub async fn insert(&self, script: &ScriptArtifact) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO scripts
                (id, video_id, purpose, target_audience, expected_duration_seconds,
                 sections, full_text, format, word_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(script.id.as_str())
        .bind(script.video_id.as_str())
        .bind(&script.purpose)
        .bind(&script.target_audience)
        .bind(script.expected_duration_seconds)
        .bind(serde_json::to_string(&script.sections)?)
        .bind(&script.full_text)
        .bind(script.format.as_str())
        .bind(script.word_count)
        .bind(script.created_at)
        .execute(&self.pool)
        .await?;
        info!(script_id = %script.id, words = script.word_count, "Inserted script");
        Ok(())
    }

    /// Get a script by ID.
    pub async fn get(&self, id: &ScriptId) -> StoreResult<Option<ScriptArtifact>> {
        let row = sqlx::query("SELECT * FROM scripts WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_script(&r)).transpose()
    }

    /// List scripts for a scored video, newest first.
    pub async fn list_for_video(&self, video_id: &VideoId) -> StoreResult<Vec<ScriptArtifact>> {
        let rows = sqlx::query(
            "SELECT * FROM scripts WHERE video_id = ? ORDER BY created_at DESC",
        )
        .bind(video_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_script).collect()
    }
}

fn row_to_script(row: &SqliteRow) -> StoreResult<ScriptArtifact> {
    let sections: String = row.try_get("sections")?;
    let format: String = row.try_get("format")?;
    Ok(ScriptArtifact {
        id: ScriptId::from_string(row.try_get::<String, _>("id")?),
        video_id: VideoId::from_string(row.try_get::<String, _>("video_id")?),
        purpose: row.try_get("purpose")?,
        target_audience: row.try_get("target_audience")?,
        expected_duration_seconds: row.try_get("expected_duration_seconds")?,
        sections: serde_json::from_str::<ScriptSections>(&sections)?,
        full_text: row.try_get("full_text")?,
        format: format_from_str(&format)?,
        word_count: row.try_get::<i64, _>("word_count")?.max(0) as u32,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Repository for generated asset rows.
#[derive(Debug, Clone)]
pub struct AssetRepo {
    pool: SqlitePool,
}

impl AssetRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an asset row (append-only).
    pub async fn insert(&self, asset: &GeneratedAsset) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO generated_assets
                (id, script_id, asset_type, kind_json, file_name, file_path,
                 file_size_bytes, status, error_message, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&asset.id)
        .bind(asset.script_id.as_str())
        .bind(asset.kind.type_label())
        .bind(serde_json::to_string(&asset.kind)?)
        .bind(&asset.file_name)
        .bind(&asset.file_path)
        .bind(asset.file_size_bytes as i64)
        .bind(asset.status.as_str())
        .bind(&asset.error_message)
        .bind(asset.created_at)
        .bind(asset.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get an asset by ID.
    pub async fn get(&self, asset_id: &str) -> StoreResult<Option<GeneratedAsset>> {
        let row = sqlx::query("SELECT * FROM generated_assets WHERE id = ?")
            .bind(asset_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_asset(&r)).transpose()
    }

    /// Transition an asset's generation status.
    ///
    /// The only sanctioned post-creation artifact mutation.
    pub async fn update_status(
        &self,
        asset_id: &str,
        status: GenerationStatus,
        error: Option<&str>,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE generated_assets
                SET status = ?, error_message = ?, updated_at = ?
              WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(error)
        .bind(Utc::now())
        .bind(asset_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("asset {asset_id}")));
        }
        Ok(())
    }

    /// Complete a `Processing` asset, filling in measured outputs.
    pub async fn mark_completed(
        &self,
        asset_id: &str,
        file_size_bytes: u64,
        kind: &AssetKind,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE generated_assets
                SET status = ?, file_size_bytes = ?, kind_json = ?,
                    error_message = NULL, updated_at = ?
              WHERE id = ?",
        )
        .bind(GenerationStatus::Completed.as_str())
        .bind(file_size_bytes as i64)
        .bind(serde_json::to_string(kind)?)
        .bind(Utc::now())
        .bind(asset_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("asset {asset_id}")));
        }
        Ok(())
    }

    /// List assets for a script, in creation order.
    pub async fn list_for_script(&self, script_id: &ScriptId) -> StoreResult<Vec<GeneratedAsset>> {
        let rows = sqlx::query(
            "SELECT * FROM generated_assets WHERE script_id = ? ORDER BY created_at ASC",
        )
        .bind(script_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_asset).collect()
    }

    /// List assets of one type for a script.
    pub async fn list_for_script_of_kind(
        &self,
        script_id: &ScriptId,
        type_label: &str,
    ) -> StoreResult<Vec<GeneratedAsset>> {
        let rows = sqlx::query(
            "SELECT * FROM generated_assets
              WHERE script_id = ? AND asset_type = ?
              ORDER BY created_at ASC",
        )
        .bind(script_id.as_str())
        .bind(type_label)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_asset).collect()
    }
}

fn row_to_asset(row: &SqliteRow) -> StoreResult<GeneratedAsset> {
    let kind_json: String = row.try_get("kind_json")?;
    let status: String = row.try_get("status")?;
    Ok(GeneratedAsset {
        id: row.try_get("id")?,
        script_id: ScriptId::from_string(row.try_get::<String, _>("script_id")?),
        kind: serde_json::from_str::<AssetKind>(&kind_json)?,
        file_name: row.try_get("file_name")?,
        file_path: row.try_get("file_path")?,
        file_size_bytes: u64_col(row, "file_size_bytes")?,
        status: generation_status_from_str(&status)?,
        error_message: row.try_get("error_message")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
