// src/api/handlers/files.rs
use actix_multipart::Multipart;
use actix_web::http::header::{self, ContentDisposition};
use actix_web::{web, HttpResponse, Result};
use futures::TryStreamExt;
use serde::Serialize;

use crate::api::AppState;
use crate::errors::GradeError;
use crate::grader::FileSlot;
use crate::models::{ApiError, UploadedFile};

#[derive(Serialize)]
pub struct FileResponse {
    pub slot: FileSlot,
    pub name: Option<String>,
    pub size: Option<usize>,
}

/// PUT /api/v1/files/{slot} - select the first file of a multipart form
pub async fn upload_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let slot = match path.parse::<FileSlot>() {
        Ok(slot) => slot,
        Err(message) => return Ok(HttpResponse::NotFound().json(ApiError::new(message))),
    };

    match read_first_file(&mut payload).await {
        Ok(file) => {
            let response = FileResponse {
                slot,
                name: Some(file.name.clone()),
                size: Some(file.bytes.len()),
            };
            state.grader.select_file(slot, file).await;
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("Upload to {} rejected: {}", slot.as_str(), e);
            Ok(HttpResponse::BadRequest().json(ApiError::new(e.to_string())))
        }
    }
}

/// DELETE /api/v1/files/{slot} - clear a slot
pub async fn remove_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let slot = match path.parse::<FileSlot>() {
        Ok(slot) => slot,
        Err(message) => return Ok(HttpResponse::NotFound().json(ApiError::new(message))),
    };

    state.grader.remove_file(slot).await;
    Ok(HttpResponse::Ok().json(FileResponse {
        slot,
        name: None,
        size: None,
    }))
}

/// Reads the whole body of the first part that carries a filename.
async fn read_first_file(payload: &mut Multipart) -> std::result::Result<UploadedFile, GradeError> {
    let read_error = |name: &str, e: actix_multipart::MultipartError| GradeError::Read {
        name: name.to_string(),
        reason: e.to_string(),
    };

    while let Some(mut field) = payload.try_next().await.map_err(|e| read_error("upload", e))? {
        let Some(name) = field
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| ContentDisposition::from_raw(value).ok())
            .and_then(|cd| cd.get_filename().map(str::to_string))
        else {
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| read_error(&name, e))? {
            bytes.extend_from_slice(&chunk);
        }
        return Ok(UploadedFile::new(name, bytes));
    }

    Err(GradeError::Read {
        name: "upload".to_string(),
        reason: "the form contained no file".to_string(),
    })
}
