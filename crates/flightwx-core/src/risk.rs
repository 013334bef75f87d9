//! Aggregate risk scoring.
//!
//! Per-parameter tiers are folded into an integer score and mapped to a
//! level with cut points relative to the highest score the classified
//! parameters could reach, so the levels stay meaningful whatever the
//! number of parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::WeatherReading;
use crate::thresholds::ThresholdTable;
use crate::weather::{classify, Classification, Tier};

/// Fraction of the maximum score below which risk is Low, in tenths.
const LOW_CUT_TENTHS: u128 = 6;
/// Fraction of the maximum score below which risk is Medium, in tenths.
const MEDIUM_CUT_TENTHS: u128 = 8;

/// Sum of tier weights.
pub type RiskScore = u32;

/// Aggregate risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sum the weights of all classified parameters.
pub fn score(tiers: &Classification) -> RiskScore {
    tiers.values().map(|tier| tier.weight()).sum()
}

/// Highest score `param_count` parameters can reach, saturating at `u64::MAX`.
pub fn max_possible(param_count: usize) -> u64 {
    (param_count as u64).saturating_mul(u64::from(Tier::Danger.weight()))
}

/// Map a score to a level.
///
/// Below 60% of the maximum is Low, below 80% is Medium, otherwise High.
/// With nothing classified there is no evidence of risk and the level is Low.
pub fn level(score: RiskScore, param_count: usize) -> RiskLevel {
    let max = max_possible(param_count);
    if max == 0 {
        return RiskLevel::Low;
    }

    // score < cut/10 * max, in u128 so boundaries are exact and nothing overflows
    let max = u128::from(max);
    let scaled = u128::from(score) * 10;
    if scaled < LOW_CUT_TENTHS * max {
        RiskLevel::Low
    } else if scaled < MEDIUM_CUT_TENTHS * max {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Classification, score and level for one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tiers: Classification,
    pub score: RiskScore,
    pub max_possible: u64,
    pub level: RiskLevel,
}

/// Classify `reading` against `table` and score the result.
pub fn assess(reading: &WeatherReading, table: &ThresholdTable) -> RiskAssessment {
    let tiers = classify(reading, table);
    let score = score(&tiers);
    let param_count = tiers.len();
    RiskAssessment {
        score,
        max_possible: max_possible(param_count),
        level: level(score, param_count),
        tiers,
    }
}
