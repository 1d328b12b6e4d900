use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::extractors::{ApiJson, CurrentUser};
use crate::state::AppState;
use crate::store::{Comment, Event, EventChanges, EventFilter, NewEvent};

// --- Requests ---

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ListEventsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct AttendResponse {
    pub message: String,
    pub attended: bool,
    pub attendees_count: usize,
}

// --- Validation ---

fn required(field: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

fn parse_time(value: &str) -> AppResult<String> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::BadRequest(format!("Invalid time '{}', expected HH:MM", value)))?;
    Ok(value.to_string())
}

impl CreateEventRequest {
    fn validate(self) -> AppResult<NewEvent> {
        Ok(NewEvent {
            title: required("Title", &self.title)?,
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            location: required("Location", &self.location)?,
            category: required("Category", &self.category)?,
            description: self.description.unwrap_or_default().trim().to_string(),
        })
    }
}

impl UpdateEventRequest {
    fn validate(self) -> AppResult<EventChanges> {
        Ok(EventChanges {
            title: self.title.as_deref().map(|v| required("Title", v)).transpose()?,
            date: self.date.as_deref().map(parse_date).transpose()?,
            time: self.time.as_deref().map(parse_time).transpose()?,
            location: self
                .location
                .as_deref()
                .map(|v| required("Location", v))
                .transpose()?,
            category: self
                .category
                .as_deref()
                .map(|v| required("Category", v))
                .transpose()?,
            description: self.description.map(|d| d.trim().to_string()),
        })
    }
}

impl ListEventsQuery {
    fn into_filter(self) -> AppResult<EventFilter> {
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Ok(EventFilter {
            category: non_empty(self.category),
            search: non_empty(self.search),
            date_from: non_empty(self.date_from).as_deref().map(parse_date).transpose()?,
            date_to: non_empty(self.date_to).as_deref().map(parse_date).transpose()?,
        })
    }
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/{id}/comments", post(add_comment))
        .route("/events/{id}/attend", post(attend_event))
}

// --- Handlers ---

async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let filter = query.into_filter()?;
    let store = state.store.lock().await;
    Ok(Json(store.list_events(&filter)))
}

async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> AppResult<Json<Event>> {
    let new = req.validate()?;
    let event = {
        let mut store = state.store.lock().await;
        store.create_event(new, &user.id)
    };

    tracing::info!("User {} created event {}", user.id, event.id);
    Ok(Json(event))
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Event>> {
    let store = state.store.lock().await;
    Ok(Json(store.event(&id)?.clone()))
}

fn ensure_can_modify(user: &CurrentUser, event: &Event) -> AppResult<()> {
    if event.created_by != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only the event creator or an admin can modify this event".into(),
        ));
    }
    Ok(())
}

async fn update_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateEventRequest>,
) -> AppResult<Json<Event>> {
    let mut store = state.store.lock().await;
    ensure_can_modify(&user, store.event(&id)?)?;
    let changes = req.validate()?;
    let event = store.update_event(&id, changes)?;

    tracing::info!("User {} updated event {}", user.id, event.id);
    Ok(Json(event))
}

async fn delete_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let deleted = {
        let mut store = state.store.lock().await;
        ensure_can_modify(&user, store.event(&id)?)?;
        store.delete_event(&id)?
    };

    tracing::info!("User {} deleted event {}", user.id, deleted.id);
    Ok(Json(json!({
        "message": "Event deleted successfully",
        "event": deleted,
    })))
}

async fn add_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CommentRequest>,
) -> AppResult<Json<Value>> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Comment cannot be empty".into()));
    }

    let comment: Comment = {
        let mut store = state.store.lock().await;
        store.add_comment(&id, &user.name, text)?
    };

    Ok(Json(json!({
        "message": "Comment added",
        "comment": comment,
    })))
}

async fn attend_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AttendResponse>> {
    let attendance = {
        let mut store = state.store.lock().await;
        store.toggle_attendance(&id, &user.id)?
    };

    let action = if attendance.attended {
        "attended"
    } else {
        "unattended"
    };

    Ok(Json(AttendResponse {
        message: format!("Successfully {} event", action),
        attended: attendance.attended,
        attendees_count: attendance.attendees_count,
    }))
}
