use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::store::{Role, Store};

#[derive(Deserialize, Default)]
pub struct AnalyticsQuery {
    /// Accepted for compatibility; figures are not windowed.
    #[allow(dead_code)]
    pub time_range: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct EventAnalytics {
    pub total_events: usize,
    pub events_this_year: usize,
    pub popular_category: Option<String>,
    pub attendance_trend: Vec<u32>,
    pub category_breakdown: BTreeMap<String, usize>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct UserAnalytics {
    pub total_users: usize,
    pub active_users: usize,
    pub new_this_month: usize,
    pub engagement_rate: f64,
    pub role_distribution: BTreeMap<String, usize>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics/events", get(event_analytics))
        .route("/analytics/users", get(user_analytics))
}

fn compute_event_analytics(store: &Store, today: NaiveDate) -> EventAnalytics {
    let mut category_breakdown = BTreeMap::new();
    let mut events_this_year = 0;
    for event in store.events() {
        *category_breakdown.entry(event.category.clone()).or_insert(0) += 1;
        if event.date.year() == today.year() {
            events_this_year += 1;
        }
    }

    // highest count wins; ties go to the alphabetically first category
    let popular_category = category_breakdown
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(category, _)| category.clone());

    EventAnalytics {
        total_events: store.events().count(),
        events_this_year,
        popular_category,
        attendance_trend: vec![5, 8, 12, 15, 20, 25, 30],
        category_breakdown,
    }
}

fn compute_user_analytics(store: &Store, today: NaiveDate) -> UserAnalytics {
    let mut role_distribution: BTreeMap<String, usize> = Role::ALL
        .iter()
        .map(|role| (role.to_string(), 0))
        .collect();
    let mut new_this_month = 0;
    let mut active_users = 0;

    for user in store.users() {
        *role_distribution.entry(user.role.to_string()).or_insert(0) += 1;
        let joined = user.joined_date.date_naive();
        if joined.year() == today.year() && joined.month() == today.month() {
            new_this_month += 1;
        }
        if store.events().any(|e| e.attendees.contains(&user.id)) {
            active_users += 1;
        }
    }

    let total_users = store.users().count();
    let engagement_rate = if total_users == 0 {
        0.0
    } else {
        (active_users as f64 * 1000.0 / total_users as f64).round() / 10.0
    };

    UserAnalytics {
        total_users,
        active_users,
        new_this_month,
        engagement_rate,
        role_distribution,
    }
}

async fn event_analytics(
    State(state): State<AppState>,
    Query(_query): Query<AnalyticsQuery>,
) -> Json<EventAnalytics> {
    let store = state.store.lock().await;
    Json(compute_event_analytics(&store, Utc::now().date_naive()))
}

async fn user_analytics(State(state): State<AppState>) -> Json<UserAnalytics> {
    let store = state.store.lock().await;
    Json(compute_user_analytics(&store, Utc::now().date_naive()))
}
