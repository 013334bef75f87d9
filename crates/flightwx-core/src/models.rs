//! Core data models for route planning and weather risk.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, Result};

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> std::result::Result<Self, String> {
        if !latitude.is_finite() {
            return Err("latitude must be a finite number".to_string());
        }
        if !longitude.is_finite() {
            return Err("longitude must be a finite number".to_string());
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {latitude} out of range [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {longitude} out of range [-180, 180]"));
        }
        Ok(Self::new(latitude, longitude))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Ordered stops of a candidate flight: `[start, waypoint..., end]`.
pub type Route = Vec<Coordinate>;

/// A route together with its total great-circle length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRoute {
    pub route: Route,
    pub distance_km: f64,
}

/// Weather parameters understood by the default threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherParameter {
    #[serde(rename = "temperature_2m")]
    Temperature2m,
    #[serde(rename = "relative_humidity_2m")]
    RelativeHumidity2m,
    Precipitation,
    Rain,
    Snowfall,
    CloudCover,
    PressureMsl,
    SurfacePressure,
    #[serde(rename = "wind_speed_10m")]
    WindSpeed10m,
    #[serde(rename = "wind_direction_10m")]
    WindDirection10m,
    #[serde(rename = "wind_gusts_10m")]
    WindGusts10m,
}

impl WeatherParameter {
    /// All parameters, in the column order of the weather store.
    pub const ALL: [WeatherParameter; 11] = [
        WeatherParameter::Temperature2m,
        WeatherParameter::RelativeHumidity2m,
        WeatherParameter::Precipitation,
        WeatherParameter::Rain,
        WeatherParameter::Snowfall,
        WeatherParameter::CloudCover,
        WeatherParameter::PressureMsl,
        WeatherParameter::SurfacePressure,
        WeatherParameter::WindSpeed10m,
        WeatherParameter::WindDirection10m,
        WeatherParameter::WindGusts10m,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherParameter::Temperature2m => "temperature_2m",
            WeatherParameter::RelativeHumidity2m => "relative_humidity_2m",
            WeatherParameter::Precipitation => "precipitation",
            WeatherParameter::Rain => "rain",
            WeatherParameter::Snowfall => "snowfall",
            WeatherParameter::CloudCover => "cloud_cover",
            WeatherParameter::PressureMsl => "pressure_msl",
            WeatherParameter::SurfacePressure => "surface_pressure",
            WeatherParameter::WindSpeed10m => "wind_speed_10m",
            WeatherParameter::WindDirection10m => "wind_direction_10m",
            WeatherParameter::WindGusts10m => "wind_gusts_10m",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.as_str() == name)
    }
}

impl fmt::Display for WeatherParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw weather values keyed by parameter name.
///
/// Unknown names are carried along untouched; classification ignores any
/// name missing from the threshold table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherReading {
    values: BTreeMap<String, f64>,
}

impl WeatherReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn parameter(&self, param: WeatherParameter) -> Option<f64> {
        self.get(param.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a reading from a JSON object of numbers.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| CoreError::Parse {
            line: err.line(),
            reason: err.to_string(),
        })
    }
}

impl FromIterator<(String, f64)> for WeatherReading {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
