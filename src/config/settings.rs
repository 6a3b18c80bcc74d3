use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::aggregate::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub devices: DevicesConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Required `X-API-Key` for device directory changes (unset = open)
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicesConfig {
    /// Devices JSON file loaded into the directory at startup
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Nesting depth beyond which record subtrees are ignored
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_body_limit() -> usize {
    4 * 1024 * 1024 // 4 MiB
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("server.body_limit", default_body_limit() as i64)?
            .set_default("aggregation.max_depth", default_max_depth() as i64)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // ALERT_RENDER_SERVER__PORT, ALERT_RENDER_API__KEY,
            // ALERT_RENDER_DEVICES__SEED_FILE, ALERT_RENDER_AGGREGATION__MAX_DEPTH, etc.
            .add_source(
                Environment::with_prefix("ALERT_RENDER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit: default_body_limit(),
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}
