//! Current-weather providers.
//!
//! Handlers and the collection loop only see [`WeatherSource`]; the live
//! Open-Meteo client and the SQLite store both implement it. Neither retries
//! or caches: a failed fetch is reported once and the caller decides.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use flightwx_core::{Coordinate, CoreError, WeatherParameter, WeatherReading};
use reqwest::Client;
use serde::Deserialize;

use crate::persistence::{weather as weather_db, Database};

/// Anything that can report the current weather at a coordinate.
pub trait WeatherSource {
    fn fetch_current(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<WeatherReading, CoreError>> + Send;
}

/// Live readings from an Open-Meteo compatible forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<HashMap<String, serde_json::Value>>,
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn current_parameters() -> String {
        WeatherParameter::ALL
            .iter()
            .map(|param| param.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    async fn request(&self, coordinate: Coordinate) -> Result<WeatherReading, CoreError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("current", Self::current_parameters()),
                ("wind_speed_unit", "ms".to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .map_err(|err| CoreError::Unavailable(err.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::Unavailable(format!(
                "weather provider HTTP {}",
                response.status()
            )));
        }

        let payload: ForecastResponse = response
            .json()
            .await
            .map_err(|err| CoreError::Unavailable(err.to_string()))?;
        let current = payload.current.ok_or_else(|| {
            CoreError::Unavailable("weather response missing current data".to_string())
        })?;

        Ok(reading_from_current(&current))
    }
}

/// Keep only recognized numeric parameters; `time`, `interval` and nulls drop out.
fn reading_from_current(current: &HashMap<String, serde_json::Value>) -> WeatherReading {
    WeatherParameter::ALL
        .into_iter()
        .filter_map(|param| {
            current
                .get(param.as_str())
                .and_then(serde_json::Value::as_f64)
                .map(|value| (param.as_str().to_string(), value))
        })
        .collect()
}

impl WeatherSource for OpenMeteoClient {
    fn fetch_current(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<WeatherReading, CoreError>> + Send {
        self.request(coordinate)
    }
}

/// Most recent collected reading from the database.
#[derive(Clone)]
pub struct StoredWeather {
    db: Database,
}

impl StoredWeather {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl WeatherSource for StoredWeather {
    fn fetch_current(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<WeatherReading, CoreError>> + Send {
        let pool = self.db.pool().clone();
        async move {
            match weather_db::latest_reading_at(&pool, coordinate).await {
                Ok(Some(stored)) => Ok(stored.reading),
                Ok(None) => Err(CoreError::NotFound(format!(
                    "no weather data stored for {}",
                    coordinate
                ))),
                Err(err) => Err(CoreError::Unavailable(err.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::init_database;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn current_block_keeps_only_known_numbers() {
        let current: HashMap<String, serde_json::Value> = serde_json::from_value(json!({
            "time": "2026-10-19T12:00",
            "interval": 900,
            "temperature_2m": 18.4,
            "wind_speed_10m": 3.1,
            "snowfall": null
        }))
        .unwrap();

        let reading = reading_from_current(&current);
        assert_eq!(
            reading,
            WeatherReading::new()
                .with("temperature_2m", 18.4)
                .with("wind_speed_10m", 3.1)
        );
    }

    #[test]
    fn requests_all_eleven_parameters() {
        let params = OpenMeteoClient::current_parameters();
        assert_eq!(params.split(',').count(), 11);
        assert!(params.starts_with("temperature_2m,"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        let client = OpenMeteoClient::new("http://127.0.0.1:9/v1/forecast", Duration::from_secs(2));
        let err = client
            .fetch_current(Coordinate::new(37.7749, -122.4194))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn stored_weather_reports_not_found_and_hits() {
        let db = init_database(":memory:", 1).await.unwrap();
        let source = StoredWeather::new(db.clone());
        let den = Coordinate::new(39.8561, -104.6737);

        let err = source.fetch_current(den).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        let reading = WeatherReading::new().with("pressure_msl", 1012.0);
        weather_db::insert_reading(db.pool(), den, Utc::now(), &reading)
            .await
            .unwrap();
        assert_eq!(source.fetch_current(den).await.unwrap(), reading);
    }
}
