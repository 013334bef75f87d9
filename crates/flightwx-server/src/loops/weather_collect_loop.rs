//! Weather collection loop.
//!
//! Periodically fetches current weather for every known airport and stores
//! one row per airport. A failed fetch or insert is logged and skipped; the
//! next tick tries again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use flightwx_core::AirportTable;

use crate::persistence::weather as weather_db;
use crate::state::AppState;
use crate::weather_source::WeatherSource;

pub async fn run_weather_collect_loop(state: Arc<AppState>, mut shutdown: broadcast::Receiver<()>) {
    let interval_s = state.config().collect_interval_s;
    if interval_s == 0 {
        tracing::info!("Weather collection disabled");
        return;
    }

    let mut ticker = interval(Duration::from_secs(interval_s));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!("Weather collection loop started ({}s interval)", interval_s);

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Weather collection loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let stored = collect_once(
                    state.live_weather(),
                    state.db().pool(),
                    state.airports(),
                )
                .await;
                tracing::debug!(
                    "Weather collection pass stored {}/{} readings",
                    stored,
                    state.airports().airports().len()
                );
            }
        }
    }
}

/// Fetch and store one reading per airport. Returns how many rows were written.
pub async fn collect_once<S: WeatherSource>(
    source: &S,
    pool: &SqlitePool,
    airports: &AirportTable,
) -> usize {
    let mut stored = 0;
    for airport in airports.airports() {
        let reading = match source.fetch_current(airport.coordinate).await {
            Ok(reading) => reading,
            Err(err) => {
                tracing::warn!("Skipping weather for {}: {}", airport.code, err);
                continue;
            }
        };

        match weather_db::insert_reading(pool, airport.coordinate, Utc::now(), &reading).await {
            Ok(_) => stored += 1,
            Err(err) => tracing::warn!("Failed to store weather for {}: {}", airport.code, err),
        }
    }
    stored
}
