use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;

use crate::auth::token::{generate_secret, TokenKeys};
use crate::config::Config;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub config: Config,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        let secret = match config.auth.jwt_secret.clone() {
            Some(secret) => secret,
            None => {
                tracing::warn!("No auth.jwt_secret configured; tokens will not survive a restart");
                generate_secret()
            }
        };
        let ttl = config.auth.token_ttl().unwrap_or_else(|| {
            tracing::warn!(
                "auth.token_minutes {} out of range; using 30",
                config.auth.token_minutes
            );
            Duration::minutes(30)
        });
        let tokens = TokenKeys::new(secret.as_bytes(), ttl);

        Self {
            store: Arc::new(Mutex::new(store)),
            config,
            tokens,
        }
    }
}
