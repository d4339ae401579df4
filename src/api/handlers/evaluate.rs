// src/api/handlers/evaluate.rs
use actix_web::{http::StatusCode, web, HttpResponse, Result};
use serde::Serialize;
use std::sync::Arc;

use crate::api::AppState;
use crate::errors::GradeError;
use crate::grader::failure_message;
use crate::models::{ApiError, EvaluationRun};

#[derive(Serialize)]
pub struct EvaluateResponse {
    pub status: &'static str,
    pub run: Arc<EvaluationRun>,
}

/// POST /api/v1/evaluate - grade the selected submission against the selected rubric
pub async fn evaluate(state: web::Data<AppState>) -> Result<HttpResponse> {
    match Arc::clone(&state.grader).evaluate().await {
        Ok(run) => Ok(HttpResponse::Ok().json(EvaluateResponse {
            status: "success",
            run,
        })),
        Err(e) => {
            let message = match &e {
                // These never leave the previous state, so they are not "failed" evaluations.
                GradeError::MissingUploads | GradeError::EvaluationInProgress => e.to_string(),
                _ => failure_message(&e),
            };
            Ok(HttpResponse::build(status_for(&e)).json(ApiError::new(message)))
        }
    }
}

/// GET /api/v1/state - current files and evaluation state
pub async fn get_state(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.grader.snapshot().await))
}

fn status_for(error: &GradeError) -> StatusCode {
    match error {
        GradeError::MissingUploads
        | GradeError::Read { .. }
        | GradeError::Parse { .. }
        | GradeError::NoExtractableText
        | GradeError::Config(_) => StatusCode::BAD_REQUEST,
        GradeError::EvaluationInProgress => StatusCode::CONFLICT,
        GradeError::RemoteEvaluation { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
