use std::path::{Component, Path, PathBuf};

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

/// Path prefixes that never fall back to the SPA shell.
const RESERVED_PREFIXES: &[&str] = &["api", "auth", "dashboard", "analytics", "admin"];

/// Join `relative` onto `root`, refusing anything that could escape it.
fn resolve_within(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}

async fn file_response(path: &Path) -> Option<Response> {
    if !tokio::fs::metadata(path).await.ok()?.is_file() {
        return None;
    }
    let data = tokio::fs::read(path).await.ok()?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref().to_string())],
            data,
        )
            .into_response(),
    )
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// GET /uploads/{*path}: serve a previously uploaded file
pub async fn uploaded_file(
    State(state): State<AppState>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    let Some(full) = resolve_within(state.config.uploads_path(), &path) else {
        return not_found();
    };
    file_response(&full).await.unwrap_or_else(not_found)
}

/// Plain prefix match, so `apiary` counts as reserved too.
fn wants_spa_shell(path: &str) -> bool {
    !RESERVED_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) && !path.contains('.')
}

/// Fallback: static files from the web root, then the SPA shell.
pub async fn spa_fallback(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return AppError::NotFound("Route").into_response();
    }

    let root = state.config.web_root();
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if let Some(full) = resolve_within(root, path) {
        if let Some(response) = file_response(&full).await {
            return response;
        }
    }

    if wants_spa_shell(path) {
        if let Some(response) = file_response(&root.join("index.html")).await {
            return response;
        }
    }

    not_found()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_within_rejects_parent_dirs() {
        let root = Path::new("/srv/www");
        assert_eq!(
            resolve_within(root, "css/app.css"),
            Some(PathBuf::from("/srv/www/css/app.css"))
        );
        assert!(resolve_within(root, "../secret").is_none());
        assert!(resolve_within(root, "a/../../b").is_none());
        assert!(resolve_within(root, "/etc/passwd").is_none());
    }

    #[test]
    fn spa_shell_skips_reserved_and_dotted_paths() {
        assert!(wants_spa_shell("events/12"));
        assert!(!wants_spa_shell("index.html"));
        assert!(!wants_spa_shell("admin/panel"));
        assert!(!wants_spa_shell("analytics"));
        assert!(!wants_spa_shell("missing.js"));
    }

    #[test]
    fn reserved_prefixes_match_without_a_separator() {
        assert!(!wants_spa_shell("apiary"));
        assert!(!wants_spa_shell("dashboard-home"));
        assert!(!wants_spa_shell("authors/list"));
        assert!(wants_spa_shell("calendar/apiary"));
    }
}
