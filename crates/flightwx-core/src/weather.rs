//! Per-parameter weather classification.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::WeatherReading;
use crate::thresholds::{ThresholdTable, ThresholdTier};

/// Qualitative tier of a single weather parameter, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Good,
    Fair,
    Danger,
}

impl Tier {
    /// Contribution to the aggregate risk score.
    pub fn weight(self) -> u32 {
        match self {
            Tier::Good => 1,
            Tier::Fair => 2,
            Tier::Danger => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Good => "Good",
            Tier::Fair => "Fair",
            Tier::Danger => "Danger",
        }
    }

    /// Place `value` against one parameter's boundaries.
    ///
    /// `value <= low` is Good, `low < value <= medium` is Fair, anything
    /// above medium is Danger. The `high` boundary does not split tiers.
    pub fn for_value(value: f64, tier: &ThresholdTier) -> Tier {
        if value <= tier.low {
            Tier::Good
        } else if value <= tier.medium {
            Tier::Fair
        } else {
            Tier::Danger
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier per classified parameter name.
pub type Classification = BTreeMap<String, Tier>;

/// Classify every parameter present in both `reading` and `table`.
///
/// Names without thresholds and non-finite values are left out of the result.
pub fn classify(reading: &WeatherReading, table: &ThresholdTable) -> Classification {
    reading
        .iter()
        .filter(|(_, value)| value.is_finite())
        .filter_map(|(name, value)| {
            table
                .get(name)
                .map(|tier| (name.to_string(), Tier::for_value(value, tier)))
        })
        .collect()
}
