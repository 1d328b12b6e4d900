pub mod admin;
pub mod analytics;
pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod events;
pub mod favorites;
pub mod notifications;
pub mod profile;
pub mod upload;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload_bytes = state.config.storage.max_upload_bytes;

    Router::new()
        .merge(auth::router())
        .merge(events::router())
        .merge(profile::router())
        .merge(favorites::router())
        .merge(notifications::router())
        .merge(analytics::router())
        .merge(dashboard::router())
        .merge(upload::router(max_upload_bytes))
        .merge(admin::router())
        .route("/uploads/{*path}", get(assets::uploaded_file))
        .fallback(assets::spa_fallback)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
