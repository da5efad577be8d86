use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_DB_PATH: &str = "sqlite:data/database.db";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_LOG_FILTER: &str = "info,pastern=debug,tower_http=info";

/// Settings read from the process environment, e.g. `PORT=9000` or
/// `DATABASE_URL=sqlite:/var/lib/pastern.db`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub upload_dir: PathBuf,
    pub rust_log: String,
}

impl AppConfig {
    pub fn build() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("database_url", DEFAULT_DB_PATH)?
            .set_default("database_max_connections", 5)?
            .set_default("upload_dir", DEFAULT_UPLOAD_DIR)?
            .set_default("rust_log", DEFAULT_LOG_FILTER)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
