use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extractors::{CurrentUser, MaybeUser};
use crate::state::AppState;
use crate::store::Store;

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_events: usize,
    pub upcoming_events: usize,
    pub my_events: usize,
    pub average_rating: f64,
    pub total_attendees: usize,
    pub total_comments: usize,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct GamificationStats {
    pub points: i64,
    pub level: i64,
    pub achievements: Vec<&'static str>,
    pub streak: u32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/gamification/stats", get(gamification_stats))
}

fn compute_dashboard(store: &Store, user_id: Option<&str>, today: NaiveDate) -> DashboardStats {
    DashboardStats {
        total_events: store.events().count(),
        upcoming_events: store.events().filter(|e| e.date >= today).count(),
        my_events: user_id
            .map(|id| store.events().filter(|e| e.created_by == id).count())
            .unwrap_or(0),
        average_rating: 4.0,
        total_attendees: store.events().map(|e| e.attendees.len()).sum(),
        total_comments: store.events().map(|e| e.comments.len()).sum(),
    }
}

fn compute_gamification(store: &Store, user_id: &str) -> Option<GamificationStats> {
    let user = store.user(user_id)?;

    let mut achievements = vec!["account_created"];
    if store.events().any(|e| e.created_by == user.id) {
        achievements.push("first_event_created");
    }
    if store.events().any(|e| e.attendees.contains(&user.id)) {
        achievements.push("event_goer");
    }

    Some(GamificationStats {
        points: user.points,
        level: user.points.max(0) / 100 + 1,
        achievements,
        streak: 3,
    })
}

async fn dashboard(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Json<DashboardStats> {
    let store = state.store.lock().await;
    let user_id = user.as_ref().map(|u| u.id.as_str());
    Json(compute_dashboard(&store, user_id, Utc::now().date_naive()))
}

async fn gamification_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<GamificationStats>> {
    let store = state.store.lock().await;
    compute_gamification(&store, &user.id)
        .map(Json)
        .ok_or(AppError::NotFound("User"))
}
