//! Tests for the HTTP routes exposed to the presentation client

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use coastcast::api;
use coastcast::config::{DefaultsConfig, UpstreamConfig};
use coastcast::{ForecastService, OpenMeteoClient};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer) -> axum::Router {
    let config = UpstreamConfig {
        geocoding_url: server.uri(),
        forecast_url: server.uri(),
        marine_url: server.uri(),
        ..UpstreamConfig::default()
    };
    let client = OpenMeteoClient::new(&config).unwrap();
    api::router(Arc::new(ForecastService::new(
        Arc::new(client),
        &DefaultsConfig::default(),
    )))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn one_day_forecast() -> Value {
    json!({
        "current": {
            "temperature_2m": 18.2,
            "relative_humidity_2m": 81,
            "rain": 0.4,
            "wind_speed_10m": 22.0
        },
        "daily": {
            "time": ["2025-11-03"],
            "temperature_2m_max": [19.5],
            "temperature_2m_min": [12.0],
            "uv_index_max": [2.5],
            "precipitation_probability_max": [80],
            "precipitation_probability_mean": [55]
        },
        "hourly": { "apparent_temperature": [16.9] }
    })
}

/// Test the health endpoint
#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], coastcast::VERSION);
}

/// Test the city picker search with several candidates
#[tokio::test]
async fn test_search_cities() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Santa Cruz"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": 1, "name": "Santa Cruz", "latitude": 32.68, "longitude": -16.79,
                  "country": "Portugal", "admin1": "Madeira" },
                { "id": 2, "name": "Santa Cruz", "latitude": 36.97, "longitude": -122.03,
                  "country": "United States" }
            ]
        })))
        .mount(&server)
        .await;

    let request = Request::builder()
        .uri("/search-cities?name=Santa%20Cruz")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::OK);
    let cities = body.as_array().unwrap();
    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0]["displayName"], "Santa Cruz, Madeira, Portugal");
    assert_eq!(cities[1]["displayName"], "Santa Cruz, , United States");
    assert!(cities[1].get("region").is_none());
}

/// Test the current-conditions route with the picker's field names
#[tokio::test]
async fn test_current_conditions_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_day_forecast()))
        .mount(&server)
        .await;

    let request = post_json(
        "/current",
        json!({
            "latitude": 41.69,
            "longitude": -8.83,
            "local": "Viana do Castelo, Viana do Castelo, Portugal",
            "is_coastal": false
        }),
    );

    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locationLabel"], "Viana do Castelo, Viana do Castelo, Portugal");
    assert_eq!(body["isRaining"], true);
    assert_eq!(body["humidity"], 81.0);
    assert_eq!(body["waveHeight"], 0.0);
    assert_eq!(body["precipitationProbabilityMean"], 55.0);
}

/// Test the multi-day route output shape
#[tokio::test]
async fn test_forecast_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_day_forecast()))
        .mount(&server)
        .await;

    let request = post_json(
        "/forecast",
        json!({ "latitude": 41.69, "longitude": -8.83, "forecast_days": 1 }),
    );

    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locationLabel"], "41.6900, -8.8300");
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2025-11-03");
    assert_eq!(days[0]["apparentTemperature"], 16.9);
    assert!(days[0].get("waveHeightMax").is_none());
}

/// Test that an unknown city becomes a 404 with a detail message
#[tokio::test]
async fn test_unknown_city_is_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (status, body) = send(app(&server), post_json("/current", json!({ "cidade": "Xyzzy" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("Xyzzy"));
}

/// Test that an upstream outage becomes a 503
#[tokio::test]
async fn test_upstream_outage_is_503() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = post_json("/forecast", json!({ "latitude": 38.7, "longitude": -9.1 }));
    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].is_string());
}

/// Test that a blank search name is a 400
#[tokio::test]
async fn test_blank_search_is_400() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .uri("/search-cities?name=%20%20")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("cannot be empty"));
}

/// Test that a body matching neither a name nor coordinates gets a detail body
#[tokio::test]
async fn test_unusable_body_is_400_with_detail() {
    let server = MockServer::start().await;

    let (status, body) = send(app(&server), post_json("/forecast", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid input"));
}

/// Test that a body that is not JSON gets a detail body
#[tokio::test]
async fn test_invalid_json_is_400_with_detail() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .method("POST")
        .uri("/current")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

/// Test that a search without a name gets a detail body
#[tokio::test]
async fn test_search_without_name_is_400_with_detail() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .uri("/search-cities")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("name"));
}
