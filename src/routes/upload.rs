use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Local;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize, Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub original_filename: String,
    pub size: usize,
    pub content_type: Option<String>,
    pub url: String,
}

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/upload/file",
        post(upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}

/// Strip any directory components a client put in the filename.
fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }
    Some(base.to_string())
}

async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadedFile>> {
    let mut multipart = multipart.map_err(|e| AppError::Upload(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_filename = field
            .file_name()
            .and_then(sanitize_filename)
            .ok_or_else(|| AppError::Upload("missing filename".into()))?;
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.body_text()))?;

        let filename = format!(
            "{}_{}",
            Local::now().format("%Y%m%d_%H%M%S"),
            original_filename
        );
        let dir = state.config.uploads_path();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;
        tokio::fs::write(dir.join(&filename), &data)
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        tracing::info!("Stored upload {} ({} bytes)", filename, data.len());

        return Ok(Json(UploadedFile {
            url: format!("/uploads/{}", filename),
            filename,
            original_filename,
            size: data.len(),
            content_type,
        }));
    }

    Err(AppError::Upload("no 'file' field in request".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("poster.png").as_deref(), Some("poster.png"));
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(
            sanitize_filename("../../etc/passwd").as_deref(),
            Some("passwd")
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\notes.txt").as_deref(),
            Some("notes.txt")
        );
    }

    #[test]
    fn sanitize_rejects_empty_and_dot_names() {
        assert!(sanitize_filename("").is_none());
        assert!(sanitize_filename("dir/").is_none());
        assert!(sanitize_filename("..").is_none());
    }
}
