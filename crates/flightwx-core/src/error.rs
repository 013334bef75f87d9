//! Error taxonomy shared by the core and its collaborators.

use thiserror::Error;

/// Failures surfaced by core operations and the lookup contracts.
///
/// Floating-point overshoot in the haversine intermediate is clamped inside
/// [`crate::spatial::distance_km`] and never appears here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Unknown location code, or no stored weather for a coordinate.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed waypoint list or reading document.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A threshold entry violates `low < medium < high`.
    #[error("invalid thresholds for {parameter}: {reason}")]
    Configuration { parameter: String, reason: String },

    /// An upstream weather source failed (network, status or payload).
    #[error("weather source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
