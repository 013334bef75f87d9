//! Location code lookup.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::models::Coordinate;

/// Turns a location code into a coordinate.
pub trait CoordinateResolver {
    /// Resolve `code`, failing with [`CoreError::NotFound`] when unknown.
    fn resolve(&self, code: &str) -> Result<Coordinate>;
}

/// A known airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub coordinate: Coordinate,
}

/// Fixed code table. Lookups trim the code and ignore case.
#[derive(Debug, Clone)]
pub struct AirportTable {
    airports: Vec<Airport>,
}

impl Default for AirportTable {
    fn default() -> Self {
        let builtin = [
            ("SFO", "San Francisco", 37.7749, -122.4194),
            ("DFW", "Dallas/Fort Worth", 32.8998, -97.0403),
            ("DEN", "Denver", 39.8561, -104.6737),
            ("LAX", "Los Angeles", 33.9416, -118.4085),
            ("ORD", "Chicago O'Hare", 41.9742, -87.9073),
        ];
        Self {
            airports: builtin
                .into_iter()
                .map(|(code, name, lat, lon)| Airport {
                    code: code.to_string(),
                    name: name.to_string(),
                    coordinate: Coordinate::new(lat, lon),
                })
                .collect(),
        }
    }
}

impl AirportTable {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn find(&self, code: &str) -> Option<&Airport> {
        let code = code.trim();
        self.airports
            .iter()
            .find(|airport| airport.code.eq_ignore_ascii_case(code))
    }
}

impl CoordinateResolver for AirportTable {
    fn resolve(&self, code: &str) -> Result<Coordinate> {
        self.find(code)
            .map(|airport| airport.coordinate)
            .ok_or_else(|| CoreError::NotFound(format!("unknown location code '{}'", code.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_codes_case_insensitively() {
        let table = AirportTable::default();
        assert_eq!(
            table.resolve("SFO").unwrap(),
            Coordinate::new(37.7749, -122.4194)
        );
        assert_eq!(table.resolve(" dfw ").unwrap(), Coordinate::new(32.8998, -97.0403));
        assert_eq!(table.airports().len(), 5);
    }

    #[test]
    fn unknown_code_is_not_found() {
        let err = AirportTable::default().resolve("JFK").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert!(AirportTable::default().resolve("").is_err());
    }
}
