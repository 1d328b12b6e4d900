use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::extractors::{ApiJson, CurrentUser};
use crate::state::AppState;
use crate::store::PublicUser;

#[derive(Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<PublicUser>> {
    let store = state.store.lock().await;
    let profile = store.user(&user.id).ok_or(AppError::NotFound("User"))?;
    Ok(Json(PublicUser::from(profile)))
}

async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<ProfileUpdateRequest>,
) -> AppResult<Json<Value>> {
    let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let name = non_empty(req.name);
    let email = non_empty(req.email);

    if email.as_deref().is_some_and(|e| !e.contains('@')) {
        return Err(AppError::BadRequest("A valid email is required".into()));
    }

    let updated = {
        let mut store = state.store.lock().await;
        store.update_profile(&user.id, name, email)?
    };

    tracing::info!("User {} updated profile", user.id);
    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": PublicUser::from(&updated),
    })))
}
