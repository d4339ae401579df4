// src/grader.rs
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{GradeError, Result};
use crate::evaluator::EvaluationClient;
use crate::extractor::extract_text_blocking;
use crate::models::{EvaluationRun, UploadedFile};

/// The two documents an evaluation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSlot {
    Submission,
    Rubric,
}

impl std::str::FromStr for FileSlot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "submission" => Ok(FileSlot::Submission),
            "rubric" => Ok(FileSlot::Rubric),
            other => Err(format!("Unknown file slot '{}'", other)),
        }
    }
}

impl FileSlot {
    pub const ALL: [FileSlot; 2] = [FileSlot::Submission, FileSlot::Rubric];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileSlot::Submission => "submission",
            FileSlot::Rubric => "rubric",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileSlot::Submission => "Student Activity PDF",
            FileSlot::Rubric => "Grading Rubric PDF",
        }
    }
}

/// Where the grader is in its evaluate cycle. Exactly one of these at a time.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum GraderState {
    Idle,
    Loading,
    Success(Arc<EvaluationRun>),
    Failed(String),
}

impl GraderState {
    pub fn is_loading(&self) -> bool {
        matches!(self, GraderState::Loading)
    }
}

/// Read-only copy of the grader for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct GraderSnapshot {
    pub submission: Option<String>,
    pub rubric: Option<String>,
    pub state: GraderState,
}

impl GraderSnapshot {
    pub fn file_name(&self, slot: FileSlot) -> Option<&str> {
        match slot {
            FileSlot::Submission => self.submission.as_deref(),
            FileSlot::Rubric => self.rubric.as_deref(),
        }
    }

    /// Whether the evaluate trigger should be enabled.
    pub fn can_evaluate(&self) -> bool {
        self.submission.is_some() && self.rubric.is_some() && !self.state.is_loading()
    }
}

struct Inner {
    submission: Option<Arc<UploadedFile>>,
    rubric: Option<Arc<UploadedFile>>,
    state: GraderState,
}

impl Inner {
    fn slot_mut(&mut self, slot: FileSlot) -> &mut Option<Arc<UploadedFile>> {
        match slot {
            FileSlot::Submission => &mut self.submission,
            FileSlot::Rubric => &mut self.rubric,
        }
    }
}

/// Owns the uploaded files and the evaluation state; the only writer of either.
pub struct Grader {
    client: EvaluationClient,
    inner: RwLock<Inner>,
}

impl Grader {
    pub fn new(client: EvaluationClient) -> Self {
        Self {
            client,
            inner: RwLock::new(Inner {
                submission: None,
                rubric: None,
                state: GraderState::Idle,
            }),
        }
    }

    /// Puts `file` in `slot`, replacing whatever was there.
    pub async fn select_file(&self, slot: FileSlot, file: UploadedFile) {
        log::info!("📄 Selected '{}' as {} ({} bytes)", file.name, slot.as_str(), file.bytes.len());
        let mut inner = self.inner.write().await;
        *inner.slot_mut(slot) = Some(Arc::new(file));
    }

    /// Clears `slot`. Returns whether a file was there.
    pub async fn remove_file(&self, slot: FileSlot) -> bool {
        let mut inner = self.inner.write().await;
        let removed = inner.slot_mut(slot).take();
        if let Some(file) = &removed {
            log::info!("🗑️  Removed '{}' from {}", file.name, slot.as_str());
        }
        removed.is_some()
    }

    pub async fn snapshot(&self) -> GraderSnapshot {
        let inner = self.inner.read().await;
        GraderSnapshot {
            submission: inner.submission.as_ref().map(|f| f.name.clone()),
            rubric: inner.rubric.as_ref().map(|f| f.name.clone()),
            state: inner.state.clone(),
        }
    }

    /// Runs one evaluation of the selected files.
    ///
    /// The pipeline runs on its own task, so dropping the returned future does
    /// not abort it; the state still ends in `Success` or `Failed`.
    pub async fn evaluate(self: Arc<Self>) -> Result<Arc<EvaluationRun>> {
        let (submission, rubric) = self.begin().await?;

        let grader = Arc::clone(&self);
        let handle = tokio::spawn(async move {
            let outcome = grader.run_pipeline(submission, rubric).await;
            grader.finish(outcome).await
        });

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => self.finish(Err(GradeError::Task(e.to_string()))).await,
        }
    }

    /// `Idle`/`Success`/`Failed` -> `Loading`, if both files are present.
    async fn begin(&self) -> Result<(Arc<UploadedFile>, Arc<UploadedFile>)> {
        let mut inner = self.inner.write().await;

        if inner.state.is_loading() {
            return Err(GradeError::EvaluationInProgress);
        }

        let (Some(submission), Some(rubric)) = (inner.submission.clone(), inner.rubric.clone()) else {
            log::warn!("Evaluate requested without both files");
            return Err(GradeError::MissingUploads);
        };

        inner.state = GraderState::Loading;
        Ok((submission, rubric))
    }

    async fn run_pipeline(
        &self,
        submission: Arc<UploadedFile>,
        rubric: Arc<UploadedFile>,
    ) -> Result<Arc<EvaluationRun>> {
        let start = Instant::now();
        log::info!("🎯 Evaluating '{}' against '{}'", submission.name, rubric.name);

        let submission_text = extract_text_blocking(Arc::clone(&submission)).await?;
        let rubric_text = extract_text_blocking(Arc::clone(&rubric)).await?;
        log::debug!(
            "Extracted {} chars of submission and {} chars of rubric",
            submission_text.len(),
            rubric_text.len()
        );

        if submission_text.trim().is_empty() || rubric_text.trim().is_empty() {
            return Err(GradeError::NoExtractableText);
        }

        let result = self.client.evaluate(&submission_text, &rubric_text).await?;

        let latency_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "✅ Evaluation complete: {} criteria, overall {} ({}ms)",
            result.evaluation.len(),
            result.overall_score,
            latency_ms
        );

        Ok(Arc::new(EvaluationRun {
            id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            latency_ms,
            submission_name: submission.name.clone(),
            rubric_name: rubric.name.clone(),
            result,
        }))
    }

    /// `Loading` -> `Success`/`Failed`.
    async fn finish(&self, outcome: Result<Arc<EvaluationRun>>) -> Result<Arc<EvaluationRun>> {
        let mut inner = self.inner.write().await;
        match &outcome {
            Ok(run) => inner.state = GraderState::Success(Arc::clone(run)),
            Err(e) => {
                log::error!("❌ Evaluation failed: {}", e);
                inner.state = GraderState::Failed(failure_message(e));
            }
        }
        outcome
    }
}

/// The text shown to the user for a failed evaluation.
pub fn failure_message(error: &GradeError) -> String {
    format!("Evaluation failed: {}", error)
}
