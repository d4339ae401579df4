// src/evaluator.rs
use std::sync::Arc;

use crate::errors::{GradeError, Result};
use crate::models::EvaluationResult;
use crate::prompt::{build_prompt, response_schema};
use crate::providers::LlmProvider;

/// Overall scores further than this from the criterion mean are logged.
const OVERALL_SCORE_DRIFT: f64 = 1.0;

/// Sends a submission/rubric pair to the model and decodes its verdict.
#[derive(Clone)]
pub struct EvaluationClient {
    provider: Arc<dyn LlmProvider>,
}

impl EvaluationClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Grades `submission_text` against `rubric_text`.
    ///
    /// Configuration problems come back as `GradeError::Config`; every other
    /// failure of the call or of decoding becomes `GradeError::RemoteEvaluation`.
    pub async fn evaluate(&self, submission_text: &str, rubric_text: &str) -> Result<EvaluationResult> {
        let prompt = build_prompt(submission_text, rubric_text);
        let schema = response_schema();

        let (raw, latency_ms) = self
            .provider
            .generate_structured(&prompt, &schema)
            .await
            .map_err(|e| {
                if matches!(e, GradeError::Config(_)) {
                    return e;
                }
                log::error!("❌ Remote evaluation failed: {}", e);
                GradeError::remote(e)
            })?;

        log::debug!("Model answered in {}ms with {} bytes", latency_ms, raw.len());

        let result = parse_evaluation(&raw).map_err(|e| {
            log::error!("❌ Model output did not match the evaluation schema: {}", e);
            GradeError::remote(e)
        })?;

        if let Some(average) = result.criterion_average() {
            if (average - result.overall_score).abs() > OVERALL_SCORE_DRIFT {
                log::warn!(
                    "⚠️  Model overall score {} differs from criterion average {:.1}; keeping the model's value",
                    result.overall_score,
                    average
                );
            }
        }

        Ok(result)
    }
}

/// Strict decode of the model's JSON answer; only surrounding whitespace is tolerated.
pub fn parse_evaluation(raw: &str) -> Result<EvaluationResult> {
    Ok(serde_json::from_str(raw.trim())?)
}
