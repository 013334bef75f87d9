pub mod airports;
pub mod error;
pub mod models;
pub mod risk;
pub mod routing;
pub mod spatial;
pub mod thresholds;
pub mod weather;

pub use airports::{Airport, AirportTable, CoordinateResolver};
pub use error::{CoreError, Result};
pub use models::{Coordinate, Route, ScoredRoute, WeatherParameter, WeatherReading};
pub use risk::{assess, RiskAssessment, RiskLevel, RiskScore};
pub use routing::{enumerate_routes, parse_waypoints, permutation_count};
pub use spatial::{distance_km, path_distance_km, EARTH_RADIUS_KM};
pub use thresholds::{ThresholdTable, ThresholdTier};
pub use weather::{classify, Classification, Tier};
