use std::{env, fs};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub url: String,
    pub clean_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub database: Database,
}

impl Settings {
    /// Loads `configs/default.toml`, or the file named by the
    /// `ROOMSYNC_CONFIG` environment variable when set.
    pub fn new() -> anyhow::Result<Self> {
        let path =
            env::var("ROOMSYNC_CONFIG").unwrap_or_else(|_| "configs/default.toml".to_string());
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings from {path}"))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("failed to parse settings from {path}"))?;

        Ok(settings)
    }
}
