//! Handles settings for the application. Configuration is written in
//! `settings.toml`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level filter, e.g. `info` or `debug`.
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Store {
    /// Directory holding the persisted state, one JSON file per key.
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct Assistant {
    /// Endpoint of the external reasoning service.
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub store: Store,
    pub assistant: Option<Assistant>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("CARRETO").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
