//! HTTP client for the Open-Meteo geocoding, forecast and marine APIs
//!
//! One client is built at startup with the fixed request timeout and shared
//! by every request. Calls are never retried: a transport error, a timeout
//! or a non-success status ends the aggregation for that request.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::fields::join_fields;
use super::payloads::{GeocodingResponse, RawAtmosphericPayload, RawMarinePayload};
use super::{AtmosphericRequest, MarineRequest, WeatherSource};
use crate::config::UpstreamConfig;
use crate::error::{ForecastError, Upstream};
use crate::models::Location;
use crate::Result;

const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Open-Meteo API client
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
    marine_url: String,
    language: String,
}

impl OpenMeteoClient {
    /// Create a client with its own HTTP connection pool and the configured timeout
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("coastcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ForecastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client around an already configured HTTP client
    #[must_use]
    pub fn with_client(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            geocoding_url: format!("{}/search", config.geocoding_url.trim_end_matches('/')),
            forecast_url: format!("{}/forecast", config.forecast_url.trim_end_matches('/')),
            marine_url: format!("{}/marine", config.marine_url.trim_end_matches('/')),
            language: config.language.clone(),
        }
    }

    /// Issue one GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        upstream: Upstream,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let start_time = Instant::now();
        debug!(%upstream, url, ?query, "Sending upstream request");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let err = ForecastError::from_transport(upstream, &e);
                error!(%upstream, error = %e, "Upstream request failed");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%upstream, status = status.as_u16(), "Upstream returned non-success status");
            return Err(ForecastError::unavailable(
                upstream,
                format!(
                    "HTTP {} - {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                ),
            ));
        }

        let body = response.bytes().await.map_err(|e| {
            error!(%upstream, error = %e, "Failed to read upstream body");
            ForecastError::from_transport(upstream, &e)
        })?;

        let elapsed = start_time.elapsed();
        if elapsed > SLOW_RESPONSE {
            warn!(%upstream, "Slow upstream response: {:.3}s", elapsed.as_secs_f64());
        }

        serde_json::from_slice(&body).map_err(|e| {
            error!(%upstream, error = %e, "Failed to parse upstream response");
            ForecastError::malformed(upstream, e.to_string())
        })
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self), fields(upstream = "geocoding"))]
    async fn geocode(&self, name: &str, count: u8) -> Result<Vec<Location>> {
        let start_time = Instant::now();
        let query = [
            ("name", name.to_string()),
            ("count", count.to_string()),
            ("language", self.language.clone()),
        ];

        let response: GeocodingResponse = self
            .get_json(Upstream::Geocoding, &self.geocoding_url, &query)
            .await?;

        let locations: Vec<Location> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Location::from)
            .collect();

        if locations.is_empty() {
            warn!("No geocoding results for '{}'", name);
        } else {
            info!(
                "Found {} geocoding results for '{}' in {:.3}s",
                locations.len(),
                name,
                start_time.elapsed().as_secs_f64()
            );
        }

        Ok(locations)
    }

    #[instrument(
        skip(self, request),
        fields(
            upstream = "forecast",
            lat = request.latitude,
            lon = request.longitude,
            days = request.forecast_days.get()
        )
    )]
    async fn fetch_atmospheric(
        &self,
        request: &AtmosphericRequest,
    ) -> Result<RawAtmosphericPayload> {
        if request.fields.daily.is_empty() {
            return Err(ForecastError::invalid_request(
                "an atmospheric fetch needs at least one daily field",
            ));
        }

        let start_time = Instant::now();
        let mut query = vec![
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
        ];
        if !request.fields.current.is_empty() {
            query.push(("current", join_fields(&request.fields.current)));
        }
        query.push(("daily", join_fields(&request.fields.daily)));
        if !request.fields.hourly.is_empty() {
            query.push(("hourly", join_fields(&request.fields.hourly)));
        }
        query.push(("timezone", "auto".to_string()));
        query.push(("forecast_days", request.forecast_days.get().to_string()));

        let payload: RawAtmosphericPayload = self
            .get_json(Upstream::Forecast, &self.forecast_url, &query)
            .await?;

        info!(
            "Retrieved atmospheric forecast with {} days in {:.3}s",
            payload.daily.as_ref().map_or(0, |daily| daily.time.len()),
            start_time.elapsed().as_secs_f64()
        );

        Ok(payload)
    }

    #[instrument(
        skip(self, request),
        fields(upstream = "marine", lat = request.latitude, lon = request.longitude)
    )]
    async fn fetch_marine(&self, request: &MarineRequest) -> Result<RawMarinePayload> {
        let start_time = Instant::now();
        let query = [
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("daily", join_fields(&request.fields.daily)),
            ("hourly", join_fields(&request.fields.hourly)),
            ("timezone", "auto".to_string()),
        ];

        let payload: RawMarinePayload = self
            .get_json(Upstream::Marine, &self.marine_url, &query)
            .await?;

        info!(
            "Retrieved marine forecast in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(payload)
    }
}
