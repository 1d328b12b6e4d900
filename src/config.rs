use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "campus-events", about = "Campus event management API server")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory of static frontend files
    #[arg(long)]
    pub web_root: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub web: WebConfig,
    pub seed: SeedConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. A random one is generated when unset.
    pub jwt_secret: Option<String>,
    pub token_minutes: u64,
    pub bcrypt_cost: u32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub uploads_path: Option<PathBuf>,
    /// Largest accepted `/upload/file` request body, in bytes.
    pub max_upload_bytes: usize,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WebConfig {
    pub root: PathBuf,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SeedConfig {
    pub sample_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
        }
    }
}

/// Upper bound for `auth.token_minutes` (ten years).
pub const MAX_TOKEN_MINUTES: u64 = 10 * 366 * 24 * 60;

impl AuthConfig {
    /// Access token lifetime, or `None` when `token_minutes` is out of range.
    pub fn token_ttl(&self) -> Option<chrono::Duration> {
        if !(1..=MAX_TOKEN_MINUTES).contains(&self.token_minutes) {
            return None;
        }
        i64::try_from(self.token_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_minutes: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_path: None,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { sample_data: true }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref root) = cli.web_root {
            config.web.root = root.clone();
        }

        if config.auth.token_ttl().is_none() {
            anyhow::bail!(
                "auth.token_minutes must be between 1 and {}, got {}",
                MAX_TOKEN_MINUTES,
                config.auth.token_minutes
            );
        }

        // Resolve paths relative to data dir
        if config.storage.uploads_path.is_none() {
            config.storage.uploads_path = Some(data_dir.join("uploads"));
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|home| home.join(".campus-events"))
                .unwrap_or_else(|| PathBuf::from(".campus-events"))
        })
    }

    pub fn uploads_path(&self) -> &Path {
        self.storage
            .uploads_path
            .as_deref()
            .unwrap_or(Path::new("uploads"))
    }

    pub fn web_root(&self) -> &Path {
        &self.web.root
    }
}
