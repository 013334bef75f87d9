//! Weather reading persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use flightwx_core::{Coordinate, WeatherParameter, WeatherReading};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Coordinates within this many degrees are treated as the same location.
const LOCATION_MATCH_EPS_DEG: f64 = 1e-6;

/// A reading as stored for one location and time.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReading {
    pub time: DateTime<Utc>,
    pub coordinate: Coordinate,
    pub reading: WeatherReading,
}

fn parameter_columns() -> String {
    WeatherParameter::ALL
        .iter()
        .map(|param| param.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Insert one reading. Parameters missing from the reading are stored as NULL.
pub async fn insert_reading(
    pool: &SqlitePool,
    coordinate: Coordinate,
    time: DateTime<Utc>,
    reading: &WeatherReading,
) -> Result<i64> {
    let placeholders = (4..4 + WeatherParameter::ALL.len())
        .map(|idx| format!("?{}", idx))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO current_weather (time, latitude, longitude, {}) VALUES (?1, ?2, ?3, {})",
        parameter_columns(),
        placeholders
    );

    let mut query = sqlx::query(&sql)
        .bind(time.to_rfc3339())
        .bind(coordinate.latitude)
        .bind(coordinate.longitude);
    for param in WeatherParameter::ALL {
        query = query.bind(reading.parameter(param));
    }

    let result = query.execute(pool).await?;
    Ok(result.last_insert_rowid())
}

/// Most recent reading stored for `coordinate`, if any.
pub async fn latest_reading_at(
    pool: &SqlitePool,
    coordinate: Coordinate,
) -> Result<Option<StoredReading>> {
    let sql = format!(
        r#"
        SELECT time, latitude, longitude, {}
        FROM current_weather
        WHERE ABS(latitude - ?1) <= ?3 AND ABS(longitude - ?2) <= ?3
        ORDER BY time DESC, id DESC
        LIMIT 1
        "#,
        parameter_columns()
    );

    let row = sqlx::query(&sql)
        .bind(coordinate.latitude)
        .bind(coordinate.longitude)
        .bind(LOCATION_MATCH_EPS_DEG)
        .fetch_optional(pool)
        .await?;

    row.map(|row| stored_reading_from_row(&row)).transpose()
}

fn stored_reading_from_row(row: &SqliteRow) -> Result<StoredReading> {
    let time: String = row.try_get("time")?;
    let time = DateTime::parse_from_rfc3339(&time)?.with_timezone(&Utc);

    let mut reading = WeatherReading::new();
    for param in WeatherParameter::ALL {
        let value: Option<f64> = row.try_get(param.as_str())?;
        if let Some(value) = value {
            reading.insert(param.as_str(), value);
        }
    }

    Ok(StoredReading {
        time,
        coordinate: Coordinate::new(row.try_get("latitude")?, row.try_get("longitude")?),
        reading,
    })
}
