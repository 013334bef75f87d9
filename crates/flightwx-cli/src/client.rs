//! HTTP client for a running flightwx server.

use anyhow::Result;
use flightwx_core::{Classification, Coordinate, RiskLevel, ScoredRoute, WeatherReading};
use serde::{Deserialize, Serialize};

/// Client for the flightwx HTTP API.
pub struct FlightWxClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct PlanRouteForm<'a> {
    departure: &'a str,
    arrival: &'a str,
    waypoints: String,
}

#[derive(Debug, Deserialize)]
pub struct PlanRouteResponse {
    pub departure: String,
    pub arrival: String,
    pub route_info: Vec<ScoredRoute>,
    pub weather_info_start: Option<Classification>,
    pub weather_info_end: Option<Classification>,
}

#[derive(Debug, Serialize)]
struct RiskAssessmentRequest {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct RiskAssessmentResponse {
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub weather_data: WeatherReading,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Wire format of the `waypoints` form field: one `lat,lon` per line.
pub fn waypoints_field(waypoints: &[Coordinate]) -> String {
    waypoints
        .iter()
        .map(|wp| format!("{},{}", wp.latitude, wp.longitude))
        .collect::<Vec<_>>()
        .join("\n")
}

impl FlightWxClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Rank routes on the server, including endpoint weather.
    pub async fn plan_route(
        &self,
        departure: &str,
        arrival: &str,
        waypoints: &[Coordinate],
    ) -> Result<PlanRouteResponse> {
        let url = format!("{}/", self.base_url);
        let form = PlanRouteForm {
            departure,
            arrival,
            waypoints: waypoints_field(waypoints),
        };

        let response = self.client.post(&url).form(&form).send().await?;
        Self::decode(response, "plan route").await
    }

    /// Score the latest weather the server stored for a coordinate.
    pub async fn assess_risk(&self, coordinate: Coordinate) -> Result<RiskAssessmentResponse> {
        let url = format!("{}/risk_assessment", self.base_url);
        let request = RiskAssessmentRequest {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        Self::decode(response, "assess risk").await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        action: &str,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "no error detail".to_string());
            anyhow::bail!("Failed to {}: {} ({})", action, status, detail);
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoints_field_matches_server_parser() {
        let waypoints = vec![
            Coordinate::new(39.8561, -104.6737),
            Coordinate::new(41.9742, -87.9073),
        ];
        let field = waypoints_field(&waypoints);
        assert_eq!(field, "39.8561,-104.6737\n41.9742,-87.9073");
        assert_eq!(flightwx_core::parse_waypoints(&field).unwrap(), waypoints);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = FlightWxClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
