// src/api/handlers/page.rs
use actix_web::{web, HttpResponse, Result};

use crate::api::AppState;
use crate::report::render_page;

/// GET / - the grader page for the current state
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = state.grader.snapshot().await;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&snapshot)))
}
