use config::{ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// When false, decisions are not persisted and history is empty
    pub enabled: bool,
    pub url: String,
    pub max_connections: u32,
}

/// Service metadata reported by `/` and `/health`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub title: String,
    pub version: String,
    pub description: String,
    pub environment: String,
    pub debug: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    /// `*` allows any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            title: "Credit Risk & Fraud Detection Platform".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Rule-based credit risk and fraud scoring for financial inclusion"
                .to_string(),
            environment: "development".to_string(),
            debug: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = AppConfig::default();

        let mut builder = config::Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.workers", 4)?
            // Database defaults
            .set_default("database.enabled", true)?
            .set_default("database.url", "sqlite://credit_risk.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            // Service metadata
            .set_default("app.title", app.title)?
            .set_default("app.version", app.version)?
            .set_default("app.description", app.description)?
            .set_default("app.environment", app.environment)?
            .set_default("app.debug", app.debug)?
            // CORS
            .set_default("cors.allowed_origins", vec!["*"])?;

        builder = builder.add_source(
            Environment::with_prefix("SCORING_API")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        // Override from environment variables
        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        if let Ok(db_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", db_url)?;
        }

        if let Ok(environment) = env::var("ENVIRONMENT") {
            builder = builder.set_override("app.environment", environment)?;
        }

        if let Ok(debug) = env::var("DEBUG") {
            builder = builder.set_override("app.debug", debug.eq_ignore_ascii_case("true"))?;
        }

        builder.build()?.try_deserialize()
    }
}
