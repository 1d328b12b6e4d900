use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites))
        .route(
            "/favorites/{event_id}",
            post(add_favorite).delete(remove_favorite),
        )
}

async fn add_favorite(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
) -> AppResult<Json<Value>> {
    let favorites = {
        let mut store = state.store.lock().await;
        store.add_favorite(&user.id, &event_id)?
    };

    Ok(Json(json!({
        "message": "Added to favorites",
        "favorites": favorites,
    })))
}

async fn remove_favorite(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
) -> AppResult<Json<Value>> {
    let favorites = {
        let mut store = state.store.lock().await;
        store.remove_favorite(&user.id, &event_id)
    };

    Ok(Json(json!({
        "message": "Removed from favorites",
        "favorites": favorites,
    })))
}

async fn list_favorites(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Value>> {
    let store = state.store.lock().await;
    Ok(Json(json!({ "favorites": store.favorite_events(&user.id) })))
}
