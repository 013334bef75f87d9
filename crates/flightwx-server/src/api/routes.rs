//! REST API routes.

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use flightwx_core::{
    assess, classify, enumerate_routes, parse_waypoints, Airport, Classification, Coordinate,
    CoordinateResolver, CoreError, RiskLevel, RiskScore, ScoredRoute, ThresholdTable,
    WeatherReading,
};

use crate::api::error::ApiError;
use crate::api::request_id;
use crate::state::AppState;
use crate::weather_source::WeatherSource;

const NO_STORED_WEATHER: &str = "No weather data found for the provided latitude and longitude";

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(plan_route))
        .route("/risk_assessment", post(risk_assessment))
        .route("/health", get(|| async { "OK" }))
        .route("/v1/airports", get(list_airports))
        .route("/v1/thresholds", get(get_thresholds))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::ensure_request_id))
        .layer(CorsLayer::permissive())
}

#[derive(Debug, Deserialize)]
pub struct PlanRouteForm {
    pub departure: String,
    pub arrival: String,
    #[serde(default)]
    pub waypoints: String,
}

#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    pub departure: String,
    pub arrival: String,
    pub route_info: Vec<ScoredRoute>,
    pub weather_info_start: Option<Classification>,
    pub weather_info_end: Option<Classification>,
}

/// Rank every waypoint ordering between two airports and attach endpoint weather.
async fn plan_route(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PlanRouteForm>,
) -> Result<Json<PlanRouteResponse>, ApiError> {
    let start = state.airports().resolve(&form.departure)?;
    let end = state.airports().resolve(&form.arrival)?;
    let waypoints = parse_waypoints(&form.waypoints)?;

    let max_waypoints = state.config().max_waypoints;
    if waypoints.len() > max_waypoints {
        return Err(ApiError::BadRequest(format!(
            "too many waypoints: {} given, at most {} allowed",
            waypoints.len(),
            max_waypoints
        )));
    }

    tracing::debug!(
        "Planning {} -> {} over {} waypoints",
        form.departure.trim(),
        form.arrival.trim(),
        waypoints.len()
    );

    let ranking = tokio::task::spawn_blocking(move || enumerate_routes(start, end, &waypoints));
    let (route_info, weather_info_start, weather_info_end) = tokio::join!(
        ranking,
        endpoint_weather(&state, "departure", start),
        endpoint_weather(&state, "arrival", end),
    );
    let route_info = route_info
        .map_err(|err| ApiError::Internal(format!("route ranking aborted: {}", err)))?;

    Ok(Json(PlanRouteResponse {
        departure: form.departure.trim().to_ascii_uppercase(),
        arrival: form.arrival.trim().to_ascii_uppercase(),
        route_info,
        weather_info_start,
        weather_info_end,
    }))
}

/// Classified current weather at one endpoint, or `None` if the provider failed.
async fn endpoint_weather(
    state: &AppState,
    label: &str,
    coordinate: Coordinate,
) -> Option<Classification> {
    match state.live_weather().fetch_current(coordinate).await {
        Ok(reading) => Some(classify(&reading, state.thresholds())),
        Err(err) => {
            tracing::warn!("Weather for {} at {} unavailable: {}", label, coordinate, err);
            None
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RiskAssessmentRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct RiskAssessmentResponse {
    pub risk_level: RiskLevel,
    pub risk_score: RiskScore,
    pub weather_data: WeatherReading,
}

/// Score the latest stored reading at a coordinate.
async fn risk_assessment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RiskAssessmentRequest>,
) -> Result<Json<RiskAssessmentResponse>, ApiError> {
    let coordinate =
        Coordinate::try_new(request.latitude, request.longitude).map_err(ApiError::BadRequest)?;

    let reading = match state.stored_weather().fetch_current(coordinate).await {
        Ok(reading) => reading,
        Err(CoreError::NotFound(_)) => {
            return Err(ApiError::NotFound(NO_STORED_WEATHER.to_string()))
        }
        Err(err) => return Err(err.into()),
    };

    let assessment = assess(&reading, state.thresholds());
    tracing::debug!(
        "Risk at {}: {} (score {} of {})",
        coordinate,
        assessment.level,
        assessment.score,
        assessment.max_possible
    );

    Ok(Json(RiskAssessmentResponse {
        risk_level: assessment.level,
        risk_score: assessment.score,
        weather_data: reading,
    }))
}

async fn list_airports(State(state): State<Arc<AppState>>) -> Json<Vec<Airport>> {
    Json(state.airports().airports().to_vec())
}

async fn get_thresholds(State(state): State<Arc<AppState>>) -> Json<ThresholdTable> {
    Json(state.thresholds().clone())
}
