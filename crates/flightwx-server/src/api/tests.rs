use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use flightwx_core::{Coordinate, WeatherReading};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, persistence, state::AppState};

async fn setup_app_with(configure: impl FnOnce(&mut Config)) -> (axum::Router, Arc<AppState>) {
    let mut config = Config::from_env();
    config.database_path = std::env::temp_dir()
        .join(format!("flightwx-test-{}.db", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();
    // Nothing listens on the discard port, so live weather always fails fast.
    config.weather_url = "http://127.0.0.1:9/v1/forecast".to_string();
    config.weather_timeout_s = 2;
    config.thresholds_path = None;
    configure(&mut config);

    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await
        .expect("init db");
    let thresholds = config.load_thresholds().expect("thresholds");
    let state = Arc::new(AppState::new(config, thresholds, db));

    (api::router(state.clone()), state)
}

async fn setup_app() -> (axum::Router, Arc<AppState>) {
    setup_app_with(|_| {}).await
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn plan_request(form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn risk_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/risk_assessment")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn plan_route_ranks_orderings_and_degrades_weather() {
    let (app, _state) = setup_app().await;

    // DEN and ORD between SFO and DFW
    let res = app
        .oneshot(plan_request(
            "departure=sfo&arrival=DFW&waypoints=39.8561%2C-104.6737%0A41.9742%2C-87.9073",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let body = read_json(res).await;
    assert_eq!(body["departure"], "SFO");
    assert_eq!(body["arrival"], "DFW");

    let routes = body["route_info"].as_array().unwrap();
    assert_eq!(routes.len(), 2);
    let first = routes[0]["distance_km"].as_f64().unwrap();
    let second = routes[1]["distance_km"].as_f64().unwrap();
    assert!(first <= second);
    assert_eq!(routes[0]["route"].as_array().unwrap().len(), 4);
    assert_eq!(routes[0]["route"][1]["latitude"], 39.8561);

    assert!(body["weather_info_start"].is_null());
    assert!(body["weather_info_end"].is_null());
}

#[tokio::test]
async fn plan_route_without_waypoints_returns_direct_route() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(plan_request("departure=LAX&arrival=ORD&waypoints="))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    let routes = body["route_info"].as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["route"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn plan_route_unknown_airport_is_not_found() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(plan_request("departure=XYZ&arrival=DFW&waypoints="))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("XYZ"));
}

#[tokio::test]
async fn plan_route_rejects_malformed_waypoints() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(plan_request(
            "departure=SFO&arrival=DFW&waypoints=39.8%2C-104.6%0Anorth%2Cwest",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("line 2"));
}

#[tokio::test]
async fn plan_route_enforces_waypoint_limit() {
    let (app, _state) = setup_app_with(|config| config.max_waypoints = 2).await;

    let res = app
        .oneshot(plan_request(
            "departure=SFO&arrival=DFW&waypoints=39.8%2C-104.6%0A41.9%2C-87.9%0A33.9%2C-118.4",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("too many waypoints"));
}

#[tokio::test]
async fn risk_assessment_without_stored_weather_is_not_found() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(risk_request(json!({"latitude": 37.7749, "longitude": -122.4194})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = read_json(res).await;
    assert_eq!(
        body["error"],
        "No weather data found for the provided latitude and longitude"
    );
}

#[tokio::test]
async fn risk_assessment_scores_latest_stored_reading() {
    let (app, state) = setup_app().await;
    let dfw = Coordinate::new(32.8998, -97.0403);

    let reading = WeatherReading::new()
        .with("temperature_2m", 31.0)
        .with("wind_speed_10m", 12.0)
        .with("rain", 0.0);
    persistence::weather::insert_reading(state.db().pool(), dfw, Utc::now(), &reading)
        .await
        .unwrap();

    let res = app
        .oneshot(risk_request(json!({"latitude": 32.8998, "longitude": -97.0403})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Danger + Danger + Good = 7 of 9, which sits between 60% and 80%
    let body = read_json(res).await;
    assert_eq!(body["risk_level"], "Medium");
    assert_eq!(body["risk_score"], 7);
    assert_eq!(body["weather_data"]["temperature_2m"], 31.0);
}

#[tokio::test]
async fn risk_assessment_rejects_out_of_range_coordinates() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(risk_request(json!({"latitude": 123.0, "longitude": 0.0})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lists_airports_and_active_thresholds() {
    let (app, _state) = setup_app().await;

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/v1/airports").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let airports = read_json(res).await;
    assert_eq!(airports.as_array().unwrap().len(), 5);
    assert_eq!(airports[0]["code"], "SFO");

    let res = app
        .oneshot(Request::builder().uri("/v1/thresholds").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let thresholds = read_json(res).await;
    assert_eq!(thresholds.as_object().unwrap().len(), 11);
    assert_eq!(thresholds["wind_speed_10m"]["medium"], 10.0);
}

#[tokio::test]
async fn client_request_id_is_echoed() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-42");
}
