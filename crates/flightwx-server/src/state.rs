//! Shared, read-only application state.

use std::time::Duration;

use flightwx_core::{AirportTable, ThresholdTable};

use crate::config::Config;
use crate::persistence::Database;
use crate::weather_source::{OpenMeteoClient, StoredWeather};

/// Everything a handler needs. Built once at startup and shared behind an `Arc`.
pub struct AppState {
    config: Config,
    thresholds: ThresholdTable,
    airports: AirportTable,
    live_weather: OpenMeteoClient,
    stored_weather: StoredWeather,
    db: Database,
}

impl AppState {
    pub fn new(config: Config, thresholds: ThresholdTable, db: Database) -> Self {
        let live_weather = OpenMeteoClient::new(
            config.weather_url.clone(),
            Duration::from_secs(config.weather_timeout_s),
        );
        Self {
            thresholds,
            airports: AirportTable::default(),
            live_weather,
            stored_weather: StoredWeather::new(db.clone()),
            db,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn airports(&self) -> &AirportTable {
        &self.airports
    }

    /// Provider used for on-demand lookups while planning routes.
    pub fn live_weather(&self) -> &OpenMeteoClient {
        &self.live_weather
    }

    /// Readings written by the collection loop.
    pub fn stored_weather(&self) -> &StoredWeather {
        &self.stored_weather
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}
