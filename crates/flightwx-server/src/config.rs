//! Server configuration from environment.

use anyhow::{Context, Result};
use flightwx_core::ThresholdTable;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    /// Open-Meteo compatible forecast endpoint.
    pub weather_url: String,
    pub weather_timeout_s: u64,
    /// Optional JSON file layered over the default threshold table.
    pub thresholds_path: Option<String>,
    /// Largest waypoint set accepted for exhaustive ranking.
    pub max_waypoints: usize,
    /// Seconds between weather collection passes; 0 disables collection.
    pub collect_interval_s: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("FLIGHTWX_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("FLIGHTWX_DATABASE_PATH")
                .unwrap_or_else(|_| "data/flightwx.db".to_string()),
            database_max_connections: env::var("FLIGHTWX_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            weather_url: env::var("FLIGHTWX_WEATHER_URL")
                .unwrap_or_else(|_| "https://api.open-meteo.com/v1/forecast".to_string()),
            weather_timeout_s: env::var("FLIGHTWX_WEATHER_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            thresholds_path: env::var("FLIGHTWX_THRESHOLDS_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            max_waypoints: env::var("FLIGHTWX_MAX_WAYPOINTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8),
            collect_interval_s: env::var("FLIGHTWX_COLLECT_INTERVAL_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Build the active threshold table.
    ///
    /// Without a configured path the defaults apply. A configured file must
    /// exist and hold a valid table, otherwise startup fails.
    pub fn load_thresholds(&self) -> Result<ThresholdTable> {
        let Some(path) = self.thresholds_path.as_deref() else {
            return Ok(ThresholdTable::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading threshold overrides from {}", path))?;
        let table = ThresholdTable::default_with_overrides(&raw)
            .with_context(|| format!("invalid threshold overrides in {}", path))?;
        tracing::info!("Loaded {} threshold entries from {}", table.len(), path);
        Ok(table)
    }

    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  FLIGHTWX_PORT                : {}", self.server_port);
        tracing::info!("  FLIGHTWX_DATABASE_PATH       : {}", self.database_path);
        tracing::info!("  FLIGHTWX_WEATHER_URL         : {}", self.weather_url);
        tracing::info!(
            "  FLIGHTWX_THRESHOLDS_PATH     : {}",
            self.thresholds_path.as_deref().unwrap_or("<defaults>")
        );
        tracing::info!("  FLIGHTWX_MAX_WAYPOINTS       : {}", self.max_waypoints);
        tracing::info!("  FLIGHTWX_COLLECT_INTERVAL_S  : {}", self.collect_interval_s);
    }
}
