use axum::extract::Path;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

#[derive(Serialize)]
pub struct Notification {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", put(mark_read))
}

// Notifications are not stored; these are fixed placeholders.
fn sample_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: "1",
            kind: "event_reminder",
            title: "Event Reminder",
            message: "Don't forget about the Welcome Event tomorrow!",
            timestamp: now,
            read: false,
        },
        Notification {
            id: "2",
            kind: "achievement",
            title: "Achievement Unlocked!",
            message: "Congratulations! You earned 'First Steps' badge",
            timestamp: now - Duration::hours(1),
            read: true,
        },
    ]
}

async fn list_notifications() -> Json<Value> {
    let notifications = sample_notifications(Utc::now());
    let unread_count = notifications.iter().filter(|n| !n.read).count();
    Json(json!({
        "notifications": notifications,
        "unread_count": unread_count,
    }))
}

async fn mark_read(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "message": "Notification marked as read",
        "notification_id": id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sample_notification_is_unread() {
        let notifications = sample_notifications(Utc::now());
        assert_eq!(notifications.iter().filter(|n| !n.read).count(), 1);
        let json = serde_json::to_value(&notifications[0]).unwrap();
        assert_eq!(json["type"], "event_reminder");
    }
}
