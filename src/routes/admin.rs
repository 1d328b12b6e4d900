use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use crate::auth::password::hash_password;
use crate::error::AppResult;
use crate::state::AppState;
use crate::store::seed::SAMPLE_PASSWORD;

#[derive(Serialize)]
pub struct InitSampleDataResponse {
    pub message: String,
    pub users_created: usize,
    pub events_created: usize,
    pub sample_credentials: BTreeMap<String, &'static str>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/init-sample-data", post(init_sample_data))
}

/// Reset the store to the built-in sample users and events.
async fn init_sample_data(State(state): State<AppState>) -> AppResult<Json<InitSampleDataResponse>> {
    let hash = hash_password(SAMPLE_PASSWORD, state.config.auth.bcrypt_cost)?;
    let summary = {
        let mut store = state.store.lock().await;
        store.reset_with_sample_data(&hash)
    };

    Ok(Json(InitSampleDataResponse {
        message: format!(
            "Initialized with {} users and {} events",
            summary.users_created, summary.events_created
        ),
        users_created: summary.users_created,
        events_created: summary.events_created,
        sample_credentials: summary
            .emails
            .into_iter()
            .map(|email| (email, SAMPLE_PASSWORD))
            .collect(),
    }))
}
