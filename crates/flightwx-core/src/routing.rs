//! Exhaustive waypoint ordering.
//!
//! Every permutation of the intermediate waypoints is scored, so the first
//! entry of the result is the exact shortest ordering. Work grows as `n! * n`;
//! single-digit waypoint counts are the practical ceiling and callers that
//! accept user input are expected to enforce their own limit.

use itertools::Itertools;

use crate::error::{CoreError, Result};
use crate::models::{Coordinate, ScoredRoute};
use crate::spatial::path_distance_km;

/// Score every ordering of `waypoints` between `start` and `end`.
///
/// Routes come back sorted by ascending total distance. Equal distances keep
/// generation order, which is lexicographic over the waypoint indices
/// (identity ordering first). Zero waypoints yields the single direct route.
pub fn enumerate_routes(
    start: Coordinate,
    end: Coordinate,
    waypoints: &[Coordinate],
) -> Vec<ScoredRoute> {
    let capacity = permutation_count(waypoints.len()).unwrap_or(0);
    let mut routes = Vec::with_capacity(capacity);

    // permutations() walks index-lexicographically and yields one empty
    // ordering when there are no waypoints.
    for order in waypoints.iter().copied().permutations(waypoints.len()) {
        let mut route = Vec::with_capacity(order.len() + 2);
        route.push(start);
        route.extend(order);
        route.push(end);

        let distance_km = path_distance_km(&route);
        routes.push(ScoredRoute { route, distance_km });
    }

    // sort_by is stable, so ties keep generation order
    routes.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    routes
}

/// Number of routes [`enumerate_routes`] produces for `n` waypoints, or
/// `None` if it does not fit in a `usize`.
pub fn permutation_count(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

/// Parse newline-separated `"lat,lon"` waypoints.
///
/// Latitude and longitude may be separated by a comma, whitespace or both.
/// Blank lines are skipped. Each line must hold exactly two finite numbers
/// within coordinate range; the first offending line aborts parsing.
pub fn parse_waypoints(input: &str) -> Result<Vec<Coordinate>> {
    let mut waypoints = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.replace('\r', "");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.len() != 2 {
            return Err(CoreError::Parse {
                line: line_no,
                reason: format!(
                    "expected \"lat,lon\" but found {} value(s) in '{}'",
                    tokens.len(),
                    line
                ),
            });
        }

        let latitude = parse_number(tokens[0], "latitude", line_no)?;
        let longitude = parse_number(tokens[1], "longitude", line_no)?;
        let waypoint = Coordinate::try_new(latitude, longitude)
            .map_err(|reason| CoreError::Parse { line: line_no, reason })?;
        waypoints.push(waypoint);
    }

    Ok(waypoints)
}

fn parse_number(token: &str, field: &str, line: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| CoreError::Parse {
        line,
        reason: format!("{field} '{token}' is not a number"),
    })
}
