//! Pipeline coordinator.
//!
//! Drives one video through the eight content-generation stages in
//! order, applying a uniform failure policy: a required stage that
//! fails aborts the run (project marked failed, partial report
//! returned), an optional stage that fails or whose precondition is
//! unmet is recorded and the run continues. Every executed stage
//! persists exactly one artifact before the loop advances.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{info, Instrument};

use vforge_models::{
    AssetKind, CommentAnalysis, ContentSummary, GeneratedAsset, GenerationStatus, PipelineRun,
    ProjectStatus, ScoredVideo, ScriptArtifact, ScriptSections, StageName, StageReport,
    SummaryDepth, VideoId,
};
use vforge_providers::{NarrationAudio, SentimentReport};
use vforge_store::ArtifactStore;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::images;
use crate::logging::RunLogger;
use crate::providers::ProviderSet;
use crate::request::PipelineRequest;

/// How one stage ended.
enum StageOutcome {
    Completed(serde_json::Value),
    Skipped(String),
    Failed(String),
}

/// Data flowing between stages of one run.
#[derive(Default)]
struct RunState {
    video: Option<ScoredVideo>,
    sentiment: Option<SentimentReport>,
    summary_text: Option<String>,
    script: Option<ScriptArtifact>,
    image_paths: Vec<String>,
    narration: Option<NarrationAudio>,
    subtitle_path: Option<String>,
}

impl RunState {
    fn video(&self) -> PipelineResult<&ScoredVideo> {
        self.video
            .as_ref()
            .ok_or_else(|| PipelineError::precondition("metadata stage has not run"))
    }

    fn sentiment(&self) -> PipelineResult<&SentimentReport> {
        self.sentiment
            .as_ref()
            .ok_or_else(|| PipelineError::precondition("comment analysis stage has not run"))
    }

    fn script(&self) -> PipelineResult<&ScriptArtifact> {
        self.script
            .as_ref()
            .ok_or_else(|| PipelineError::precondition("script generation stage has not run"))
    }

    fn narration(&self) -> PipelineResult<&NarrationAudio> {
        self.narration
            .as_ref()
            .ok_or_else(|| PipelineError::precondition("narration stage has not run"))
    }
}

/// Coordinates pipeline runs over a shared store and collaborator set.
///
/// One run is strictly sequential across stages; runs for different
/// projects may proceed concurrently over the same coordinator. The
/// coordinator does not guard against two concurrent runs for the same
/// project; that is the caller's responsibility.
pub struct PipelineCoordinator {
    store: ArtifactStore,
    providers: ProviderSet,
    config: PipelineConfig,
}

impl PipelineCoordinator {
    pub fn new(store: ArtifactStore, providers: ProviderSet, config: PipelineConfig) -> Self {
        Self {
            store,
            providers,
            config,
        }
    }

    /// Run one video through the pipeline.
    ///
    /// Returns `Err` only for rejected requests (validation, unknown
    /// project) and coordinator bookkeeping failures. A run that aborts
    /// on a required stage still returns `Ok` with a failed report
    /// carrying the stages reached.
    pub async fn run(&self, request: PipelineRequest) -> PipelineResult<PipelineRun> {
        request.validate()?;

        let project = self
            .store
            .projects()
            .get(&request.project_id)
            .await?
            .ok_or_else(|| {
                PipelineError::not_found(format!("project {}", request.project_id))
            })?;

        let mut run = PipelineRun::begin(
            project.id.clone(),
            request.video_id.clone(),
            request.format,
        );
        let logger = RunLogger::new(&run.run_id, &project.id);
        logger.log_start(&format!(
            "video {} as {}",
            request.video_id, request.format
        ));

        self.store
            .projects()
            .update_status(&project.id, ProjectStatus::Processing)
            .await?;

        let mut state = RunState::default();

        for stage in StageName::ORDER {
            let outcome = match self
                .execute_stage(stage, &request, &mut state)
                .instrument(logger.create_span())
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => StageOutcome::Failed(e.to_string()),
            };

            match outcome {
                StageOutcome::Completed(summary) => {
                    logger.log_stage(stage, "Stage completed");
                    run.record(StageReport::completed(stage, summary));
                }
                StageOutcome::Skipped(reason) => {
                    logger.log_stage(stage, &format!("Stage skipped: {reason}"));
                    run.record(StageReport::skipped(stage, reason));
                }
                StageOutcome::Failed(reason) => {
                    run.record(StageReport::failed(stage, reason.clone()));
                    if stage.is_required() {
                        let message = format!("{stage} failed: {reason}");
                        logger.log_error(&message);
                        run.finish_failed(message.as_str());
                        self.store.projects().fail(&project.id, &message).await?;
                        return Ok(run);
                    }
                    logger.log_warning(&format!("Optional stage {stage} failed: {reason}"));
                }
            }
        }

        run.finish_completed();
        self.store.projects().complete(&project.id).await?;
        logger.log_completion(&format!("{} stages recorded", run.stages.len()));
        Ok(run)
    }

    async fn execute_stage(
        &self,
        stage: StageName,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        match stage {
            StageName::Metadata => self.run_metadata(request, state).await,
            StageName::CommentAnalysis => self.run_comment_analysis(request, state).await,
            StageName::ContentSummary => self.run_content_summary(request, state).await,
            StageName::ScriptGeneration => self.run_script_generation(request, state).await,
            StageName::ImageGeneration => self.run_image_generation(request, state).await,
            StageName::Narration => self.run_narration(request, state).await,
            StageName::Subtitles => self.run_subtitles(request, state).await,
            StageName::VideoComposition => self.run_video_composition(request, state).await,
        }
    }

    /// Stage 1: fetch metadata, score, persist the scored video.
    async fn run_metadata(
        &self,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        let ids = vec![request.video_id.clone()];
        let videos = match self.providers.video_metadata.fetch_videos(&ids).await {
            Ok(videos) => videos,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };
        let Some(info) = videos.into_iter().next() else {
            return Ok(StageOutcome::Failed(format!(
                "video {} not found on source platform",
                request.video_id
            )));
        };

        let channel_ids = vec![info.channel_id.clone()];
        let channels = match self
            .providers
            .channel_metadata
            .fetch_channels(&channel_ids)
            .await
        {
            Ok(channels) => channels,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };
        let Some(channel) = channels.into_iter().next() else {
            return Ok(StageOutcome::Failed(format!(
                "channel {} not found on source platform",
                info.channel_id
            )));
        };

        let scored = vforge_score::score(
            info.view_count,
            channel.subscriber_count,
            info.published_at,
            request.format,
        );

        let video = ScoredVideo {
            id: VideoId::new(),
            project_id: request.project_id.clone(),
            source_video_id: info.source_video_id,
            title: info.title,
            channel_id: channel.channel_id,
            channel_name: channel.name,
            subscriber_count: channel.subscriber_count,
            view_count: info.view_count,
            like_count: info.like_count,
            comment_count: info.comment_count,
            duration_seconds: info.duration_seconds,
            published_at: info.published_at,
            thumbnail_url: info.thumbnail_url,
            format: request.format,
            viral_score: scored.score,
            viral_grade: scored.grade,
            created_at: Utc::now(),
        };
        self.store.videos().insert(&video).await?;

        let summary = serde_json::json!({
            "title": video.title,
            "viral_score": video.viral_score,
            "viral_grade": video.viral_grade.as_str(),
        });
        state.video = Some(video);
        Ok(StageOutcome::Completed(summary))
    }

    /// Stage 2: collect comments, analyze sentiment, persist.
    async fn run_comment_analysis(
        &self,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        let video_id = state.video()?.id.clone();

        let comments = match self
            .providers
            .comment_collector
            .collect(&request.video_id, request.format)
            .await
        {
            Ok(comments) => comments,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };

        let report = match self
            .providers
            .sentiment_analyzer
            .analyze(&comments, request.format)
            .await
        {
            Ok(report) => report,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };

        let analysis = CommentAnalysis {
            id: uuid::Uuid::new_v4().to_string(),
            video_id,
            total_comments: report.total_comments,
            positive_count: report.positive_count,
            negative_count: report.negative_count,
            positive_summary: report.positive_summary.clone(),
            negative_summary: report.negative_summary.clone(),
            keywords: report.keywords.clone(),
            improvement_suggestions: report.improvement_suggestions.clone(),
            raw_payload: report.raw_payload.clone(),
            model: report.model.clone(),
            created_at: Utc::now(),
        };
        self.store.analyses().insert(&analysis).await?;

        let summary = serde_json::json!({
            "total_comments": analysis.total_comments,
            "positive_count": analysis.positive_count,
            "negative_count": analysis.negative_count,
        });
        state.sentiment = Some(report);
        Ok(StageOutcome::Completed(summary))
    }

    /// Stage 3 (optional): summarize the transcript, if one was given.
    async fn run_content_summary(
        &self,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        let Some(transcript) = request.transcript.as_deref() else {
            return Ok(StageOutcome::Skipped("No transcript provided".to_string()));
        };
        let video_id = state.video()?.id.clone();

        let report = match self
            .providers
            .summarizer
            .summarize(transcript, request.format)
            .await
        {
            Ok(report) => report,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };

        let summary = ContentSummary {
            id: uuid::Uuid::new_v4().to_string(),
            video_id,
            transcript: Some(transcript.to_string()),
            one_line_summary: report.one_line_summary.clone(),
            detailed_summary: report.detailed_summary.clone(),
            key_points: report.key_points.clone(),
            depth: SummaryDepth::Standard,
            created_at: Utc::now(),
        };
        self.store.summaries().insert(&summary).await?;

        let payload = serde_json::json!({
            "one_line_summary": summary.one_line_summary,
            "key_points": summary.key_points.len(),
        });
        state.summary_text = Some(report.detailed_summary);
        Ok(StageOutcome::Completed(payload))
    }

    /// Stage 4: generate the narration script.
    ///
    /// Without a content summary the video title stands in as the
    /// minimal summary, so a transcript-less run still gets a script.
    async fn run_script_generation(
        &self,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        let video = state.video()?;
        let video_id = video.id.clone();
        let summary_input = state
            .summary_text
            .clone()
            .unwrap_or_else(|| video.title.clone());
        let sentiment = state.sentiment()?;

        let generated = match self
            .providers
            .script_generator
            .generate(
                &summary_input,
                sentiment,
                request.format,
                request.target_audience.as_deref(),
            )
            .await
        {
            Ok(script) => script,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };

        let purpose = match request.format {
            vforge_models::ContentFormat::Short => "derivative short",
            vforge_models::ContentFormat::Long => "derivative long-form",
        };
        let script = ScriptArtifact::new(
            video_id,
            purpose,
            request.target_audience.clone(),
            generated.estimated_duration_seconds,
            ScriptSections {
                hook: generated.hook,
                intro: generated.intro,
                body: generated.body,
                conclusion: generated.conclusion,
            },
            generated.full_script,
            request.format,
        );
        self.store.scripts().insert(&script).await?;

        let summary = serde_json::json!({
            "script_id": script.id.as_str(),
            "word_count": script.word_count,
            "expected_duration_seconds": script.expected_duration_seconds,
        });
        state.script = Some(script);
        Ok(StageOutcome::Completed(summary))
    }

    /// Stage 5 (optional): prompt derivation plus bounded-parallel
    /// image generation; partial batches succeed, empty ones fail.
    async fn run_image_generation(
        &self,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        if request.skip_image_generation {
            return Ok(StageOutcome::Skipped("Skipped by user".to_string()));
        }
        let script = state.script()?;
        let script_id = script.id.clone();
        let full_text = script.full_text.clone();

        let prompts = match self
            .providers
            .image_prompt_generator
            .prompts(&full_text, request.format)
            .await
        {
            Ok(prompts) => prompts,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };
        if prompts.is_empty() {
            return Ok(StageOutcome::Failed("no image prompts derived".to_string()));
        }

        let outcomes = images::generate_batch(
            Arc::clone(&self.providers.image_generator),
            &full_text,
            &prompts,
            request.format,
            self.config.image_concurrency,
        )
        .await;

        let requested = outcomes.len();
        let mut succeeded = 0usize;
        let mut paths = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(file) => {
                    let asset = GeneratedAsset::completed(
                        script_id.clone(),
                        AssetKind::Image {
                            prompt: outcome.prompt,
                            resolution: file.resolution.clone(),
                            sequence_index: outcome.index,
                        },
                        file.file_path.clone(),
                        file.file_size_bytes,
                    );
                    self.store.assets().insert(&asset).await?;
                    paths.push(file.file_path);
                    succeeded += 1;
                }
                Err(e) => {
                    let asset = GeneratedAsset::failed(
                        script_id.clone(),
                        AssetKind::Image {
                            prompt: outcome.prompt,
                            resolution: String::new(),
                            sequence_index: outcome.index,
                        },
                        e.to_string(),
                    );
                    self.store.assets().insert(&asset).await?;
                }
            }
        }

        if succeeded == 0 {
            return Ok(StageOutcome::Failed(format!(
                "all {requested} image generations failed"
            )));
        }

        let summary = serde_json::json!({
            "requested": requested,
            "succeeded": succeeded,
            "failed": requested - succeeded,
            "paths": paths.clone(),
        });
        state.image_paths = paths;
        Ok(StageOutcome::Completed(summary))
    }

    /// Stage 6: synthesize narration under the configured deadline.
    async fn run_narration(
        &self,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        let script = state.script()?;
        let script_id = script.id.clone();
        let full_text = script.full_text.clone();

        let synthesis = timeout(
            self.config.narration_deadline,
            self.providers
                .narration_synthesizer
                .synthesize(&full_text, request.format),
        )
        .await;

        let audio = match synthesis {
            Ok(Ok(audio)) => audio,
            Ok(Err(e)) => return Ok(StageOutcome::Failed(e.to_string())),
            Err(_) => {
                return Ok(StageOutcome::Failed(format!(
                    "narration timed out after {}s",
                    self.config.narration_deadline.as_secs()
                )))
            }
        };

        let asset = GeneratedAsset::completed(
            script_id,
            AssetKind::Voice {
                duration_seconds: audio.duration_seconds,
                provider: audio.provider.clone(),
                voice_id: audio.voice_id.clone(),
            },
            audio.file_path.clone(),
            audio.file_size_bytes,
        );
        self.store.assets().insert(&asset).await?;

        let summary = serde_json::json!({
            "duration_seconds": audio.duration_seconds,
            "provider": audio.provider,
            "file_path": audio.file_path,
        });
        state.narration = Some(audio);
        Ok(StageOutcome::Completed(summary))
    }

    /// Stage 7: generate and persist subtitles timed to the narration.
    async fn run_subtitles(
        &self,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        let script = state.script()?;
        let script_id = script.id.clone();
        let full_text = script.full_text.clone();
        let narration_duration = state.narration()?.duration_seconds;
        let source_video_id = request.video_id.clone();

        let doc = match self
            .providers
            .subtitle_generator
            .generate(&full_text, narration_duration, request.format)
            .await
        {
            Ok(doc) => doc,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };

        let file = match self
            .providers
            .subtitle_persister
            .persist(&doc, &source_video_id)
            .await
        {
            Ok(file) => file,
            Err(e) => return Ok(StageOutcome::Failed(e.to_string())),
        };

        let asset = GeneratedAsset::completed(
            script_id,
            AssetKind::Subtitle {
                format: doc.format.clone(),
                line_count: file.line_count,
            },
            file.file_path.clone(),
            file.file_size_bytes,
        );
        self.store.assets().insert(&asset).await?;

        let summary = serde_json::json!({
            "line_count": file.line_count,
            "file_path": file.file_path,
        });
        state.subtitle_path = Some(file.file_path);
        Ok(StageOutcome::Completed(summary))
    }

    /// Stage 8 (optional): compose the final video.
    ///
    /// The video asset row is written `Processing` before composition
    /// starts and always transitioned to a terminal status afterwards,
    /// including on deadline expiry.
    async fn run_video_composition(
        &self,
        request: &PipelineRequest,
        state: &mut RunState,
    ) -> PipelineResult<StageOutcome> {
        if request.skip_video_generation {
            return Ok(StageOutcome::Skipped("Skipped by user".to_string()));
        }
        if state.image_paths.is_empty() {
            return Ok(StageOutcome::Skipped("No images available".to_string()));
        }
        if !self.providers.video_compositor.check_installation().await {
            return Ok(StageOutcome::Failed("FFmpeg not installed".to_string()));
        }

        let script_id = state.script()?.id.clone();
        let video_key = state.video()?.id.as_str().to_string();
        let narration = state.narration()?;
        let subtitle_path = state
            .subtitle_path
            .clone()
            .ok_or_else(|| PipelineError::precondition("subtitles stage has not run"))?;

        let resolution = match request.format {
            vforge_models::ContentFormat::Short => "1080x1920",
            vforge_models::ContentFormat::Long => "1920x1080",
        };
        let asset = GeneratedAsset::processing(
            script_id,
            AssetKind::Video {
                resolution: resolution.to_string(),
                duration_seconds: 0.0,
                codec: "h264".to_string(),
                fps: 30,
            },
            format!("{}/{}/final.mp4", self.config.asset_dir, video_key),
        );
        self.store.assets().insert(&asset).await?;

        let composition = timeout(
            self.config.composition_deadline,
            self.providers.video_compositor.compose(
                &state.image_paths,
                &narration.file_path,
                &subtitle_path,
            ),
        )
        .await;

        let output = match composition {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                let message = e.to_string();
                self.store
                    .assets()
                    .update_status(&asset.id, GenerationStatus::Failed, Some(&message))
                    .await?;
                return Ok(StageOutcome::Failed(message));
            }
            Err(_) => {
                let message = format!(
                    "composition timed out after {}s",
                    self.config.composition_deadline.as_secs()
                );
                self.store
                    .assets()
                    .update_status(&asset.id, GenerationStatus::Failed, Some(&message))
                    .await?;
                return Ok(StageOutcome::Failed(message));
            }
        };

        let final_kind = AssetKind::Video {
            resolution: output.resolution.clone(),
            duration_seconds: output.duration_seconds,
            codec: output.codec.clone(),
            fps: output.fps,
        };
        self.store
            .assets()
            .mark_completed(&asset.id, output.file_size_bytes, &final_kind)
            .await?;

        info!(
            file_path = %output.file_path,
            duration_seconds = output.duration_seconds,
            "Composed final video"
        );
        let summary = serde_json::json!({
            "file_path": output.file_path,
            "duration_seconds": output.duration_seconds,
            "file_size_bytes": output.file_size_bytes,
        });
        Ok(StageOutcome::Completed(summary))
    }
}
