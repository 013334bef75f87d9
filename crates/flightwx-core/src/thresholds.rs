//! Weather threshold configuration.
//!
//! The table is a plain value handed to the classifier and scorer. Build it
//! from the defaults, from explicit entries, or from JSON; every path
//! validates `low < medium < high` before the table can be used.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, Result};
use crate::models::WeatherParameter;

/// Tier boundaries for one weather parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTier {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl ThresholdTier {
    pub const fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    fn validate(&self, parameter: &str) -> Result<()> {
        let invalid = |reason: String| CoreError::Configuration {
            parameter: parameter.to_string(),
            reason,
        };

        if !(self.low.is_finite() && self.medium.is_finite() && self.high.is_finite()) {
            return Err(invalid("boundaries must be finite numbers".to_string()));
        }
        if self.low >= self.medium || self.medium >= self.high {
            return Err(invalid(format!(
                "expected low < medium < high, got {} / {} / {}",
                self.low, self.medium, self.high
            )));
        }
        Ok(())
    }
}

/// Validated mapping from parameter name to tier boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, ThresholdTier>", into = "BTreeMap<String, ThresholdTier>")]
pub struct ThresholdTable {
    entries: BTreeMap<String, ThresholdTier>,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let entries = WeatherParameter::ALL
            .into_iter()
            .map(|param| (param.as_str().to_string(), default_tier(param)))
            .collect();
        Self { entries }
    }
}

/// Factory boundaries; pressures in hPa, precipitation in mm/h, wind in m/s.
fn default_tier(param: WeatherParameter) -> ThresholdTier {
    match param {
        WeatherParameter::Temperature2m => ThresholdTier::new(10.0, 20.0, 30.0),
        WeatherParameter::RelativeHumidity2m => ThresholdTier::new(30.0, 60.0, 90.0),
        WeatherParameter::Precipitation => ThresholdTier::new(0.1, 1.0, 5.0),
        WeatherParameter::Rain => ThresholdTier::new(0.1, 1.0, 5.0),
        WeatherParameter::Snowfall => ThresholdTier::new(1.0, 5.0, 10.0),
        WeatherParameter::CloudCover => ThresholdTier::new(0.1, 0.5, 0.8),
        WeatherParameter::PressureMsl => ThresholdTier::new(980.0, 1000.0, 1020.0),
        WeatherParameter::SurfacePressure => ThresholdTier::new(980.0, 1000.0, 1020.0),
        WeatherParameter::WindSpeed10m => ThresholdTier::new(5.0, 10.0, 20.0),
        WeatherParameter::WindDirection10m => ThresholdTier::new(0.0, 180.0, 360.0),
        WeatherParameter::WindGusts10m => ThresholdTier::new(10.0, 20.0, 30.0),
    }
}

impl ThresholdTable {
    /// Build a table from explicit entries, rejecting any invalid tier.
    pub fn new(entries: BTreeMap<String, ThresholdTier>) -> Result<Self> {
        for (parameter, tier) in &entries {
            tier.validate(parameter)?;
        }
        Ok(Self { entries })
    }

    /// Parse and validate a JSON object of `{"name": {"low", "medium", "high"}}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: BTreeMap<String, ThresholdTier> =
            serde_json::from_str(json).map_err(|err| CoreError::Configuration {
                parameter: "<table>".to_string(),
                reason: err.to_string(),
            })?;
        Self::new(entries)
    }

    /// Replace or add one parameter's boundaries.
    pub fn with_override(mut self, parameter: impl Into<String>, tier: ThresholdTier) -> Result<Self> {
        let parameter = parameter.into();
        tier.validate(&parameter)?;
        self.entries.insert(parameter, tier);
        Ok(self)
    }

    /// Default table with `overrides` layered on top.
    pub fn default_with_overrides(overrides: &str) -> Result<Self> {
        let overrides = Self::from_json_str(overrides)?;
        let mut table = Self::default();
        table.entries.extend(overrides.entries);
        Ok(table)
    }

    pub fn get(&self, parameter: &str) -> Option<&ThresholdTier> {
        self.entries.get(parameter)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThresholdTier)> {
        self.entries.iter().map(|(name, tier)| (name.as_str(), tier))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<BTreeMap<String, ThresholdTier>> for ThresholdTable {
    type Error = CoreError;

    fn try_from(entries: BTreeMap<String, ThresholdTier>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<ThresholdTable> for BTreeMap<String, ThresholdTier> {
    fn from(table: ThresholdTable) -> Self {
        table.entries
    }
}
