use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use campus_events::auth::password::hash_password;
use campus_events::config::{Cli, Config};
use campus_events::routes;
use campus_events::state::AppState;
use campus_events::store::seed::SAMPLE_PASSWORD;
use campus_events::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    // Ensure uploads directory exists
    std::fs::create_dir_all(config.uploads_path())?;
    tracing::info!("Serving static files from {}", config.web_root().display());

    let mut store = Store::new();
    if config.seed.sample_data {
        let hash = hash_password(SAMPLE_PASSWORD, config.auth.bcrypt_cost)?;
        store.reset_with_sample_data(&hash);
    }

    let state = AppState::new(config.clone(), store);
    let app = routes::app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
