use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::ForecastError;
use crate::forecast_service::{ForecastRequest, ForecastService};
use crate::models::{CurrentConditions, ForecastResult, Location};

type SharedService = Arc<ForecastService>;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// HTTP status reported for each error kind
#[must_use]
pub fn status_code(err: &ForecastError) -> StatusCode {
    match err {
        ForecastError::NotFound { .. } => StatusCode::NOT_FOUND,
        ForecastError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ForecastError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ForecastError::MalformedUpstreamResponse { .. } | ForecastError::Config { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ForecastError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            detail: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ForecastError {
    fn from(rejection: JsonRejection) -> Self {
        ForecastError::invalid_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ForecastError {
    fn from(rejection: QueryRejection) -> Self {
        ForecastError::invalid_request(rejection.body_text())
    }
}

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search-cities", get(search_cities))
        .route("/forecast", post(get_forecast))
        .route("/current", post(get_current))
        .with_state(service)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn search_cities(
    State(service): State<SharedService>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Location>>, ForecastError> {
    let Query(params) = params?;
    let locations = service.search_locations(&params.name).await?;
    Ok(Json(locations))
}

async fn get_forecast(
    State(service): State<SharedService>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<ForecastResult>, ForecastError> {
    let Json(request) = payload?;
    let forecast = service.get_forecast(&request).await?;
    Ok(Json(forecast))
}

async fn get_current(
    State(service): State<SharedService>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<CurrentConditions>, ForecastError> {
    let Json(request) = payload?;
    let snapshot = service.get_current_conditions(&request).await?;
    Ok(Json(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Upstream;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_code(&ForecastError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_code(&ForecastError::timeout(Upstream::Forecast)),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_code(&ForecastError::unavailable(Upstream::Marine, "HTTP 502")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_code(&ForecastError::malformed(Upstream::Forecast, "no current")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_code(&ForecastError::invalid_request("empty")),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_query_rejection_becomes_invalid_request() {
        use axum::extract::FromRequestParts;

        let (mut parts, ()) = axum::http::Request::builder()
            .uri("/search-cities")
            .body(())
            .unwrap()
            .into_parts();
        let rejection = Query::<SearchParams>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        let err = ForecastError::from(rejection);
        assert!(matches!(err, ForecastError::InvalidRequest { .. }));
        assert!(err.user_message().contains("name"));
        assert_eq!(status_code(&err), StatusCode::BAD_REQUEST);
    }
}
