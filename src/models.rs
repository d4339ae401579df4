// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How well a submission meets one rubric criterion.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStatus {
    Fulfilled,
    PartiallyFulfilled,
    NotFulfilled,
}

impl EvaluationStatus {
    pub const ALL: [EvaluationStatus; 3] = [
        EvaluationStatus::Fulfilled,
        EvaluationStatus::PartiallyFulfilled,
        EvaluationStatus::NotFulfilled,
    ];

    /// The literal used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::Fulfilled => "FULFILLED",
            EvaluationStatus::PartiallyFulfilled => "PARTIALLY_FULFILLED",
            EvaluationStatus::NotFulfilled => "NOT_FULFILLED",
        }
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CriterionEvaluation {
    pub criterion: String,
    pub status: EvaluationStatus,
    /// 0-100; the range is asked of the model, not checked.
    pub score: f64,
    pub justification: String,
    pub suggestion: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub evaluation: Vec<CriterionEvaluation>,
    pub overall_score: f64,
    pub overall_feedback: String,
}

impl EvaluationResult {
    /// Mean of the per-criterion scores, `None` when there are no criteria.
    pub fn criterion_average(&self) -> Option<f64> {
        if self.evaluation.is_empty() {
            return None;
        }
        let total: f64 = self.evaluation.iter().map(|c| c.score).sum();
        Some(total / self.evaluation.len() as f64)
    }
}

/// One successful evaluation and where it came from.
#[derive(Debug, Serialize, Clone)]
pub struct EvaluationRun {
    pub id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub latency_ms: u64,
    pub submission_name: String,
    pub rubric_name: String,
    pub result: EvaluationResult,
}

/// A file the user picked for one of the two slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// JSON body returned by API handlers on failure.
#[derive(Serialize, Clone, Debug)]
pub struct ApiError {
    pub status: &'static str,
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: error.into(),
        }
    }
}
