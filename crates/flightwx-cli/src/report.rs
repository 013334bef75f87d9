//! Plain-text rendering for CLI output.

use flightwx_core::{Classification, RiskAssessment, ScoredRoute};

/// One line per route, shortest first, limited to `top` entries.
pub fn format_routes(routes: &[ScoredRoute], top: usize) -> String {
    let mut out = String::new();
    for (rank, scored) in routes.iter().take(top).enumerate() {
        let stops = scored
            .route
            .iter()
            .map(|stop| stop.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        out.push_str(&format!(
            "{:>3}. {:>10.1} km  {}\n",
            rank + 1,
            scored.distance_km,
            stops
        ));
    }
    if routes.len() > top {
        out.push_str(&format!("     ... {} more\n", routes.len() - top));
    }
    out
}

pub fn format_classification(label: &str, tiers: Option<&Classification>) -> String {
    let Some(tiers) = tiers else {
        return format!("{}: weather unavailable\n", label);
    };
    let mut out = format!("{}:\n", label);
    for (parameter, tier) in tiers {
        out.push_str(&format!("  {:<22} {}\n", parameter, tier.as_str()));
    }
    out
}

pub fn format_assessment(assessment: &RiskAssessment) -> String {
    let mut out = format_classification("Tiers", Some(&assessment.tiers));
    out.push_str(&format!(
        "Risk: {} (score {} of {})\n",
        assessment.level, assessment.score, assessment.max_possible
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightwx_core::{assess, enumerate_routes, Coordinate, ThresholdTable, WeatherReading};

    #[test]
    fn routes_are_ranked_and_truncated() {
        let routes = enumerate_routes(
            Coordinate::new(37.7749, -122.4194),
            Coordinate::new(32.8998, -97.0403),
            &[
                Coordinate::new(39.8561, -104.6737),
                Coordinate::new(41.9742, -87.9073),
                Coordinate::new(33.9416, -118.4085),
            ],
        );
        let text = format_routes(&routes, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("1."));
        assert!(lines[1].trim_start().starts_with("2."));
        assert_eq!(lines[2].trim(), "... 4 more");
    }

    #[test]
    fn missing_weather_is_reported() {
        assert_eq!(
            format_classification("Departure", None),
            "Departure: weather unavailable\n"
        );
    }

    #[test]
    fn assessment_lists_tiers_and_level() {
        let reading = WeatherReading::new()
            .with("temperature_2m", 5.0)
            .with("wind_speed_10m", 25.0);
        let text = format_assessment(&assess(&reading, &ThresholdTable::default()));
        assert!(text.contains("temperature_2m"));
        assert!(text.contains("Danger"));
        assert!(text.ends_with("Risk: Medium (score 4 of 6)\n"));
    }
}
