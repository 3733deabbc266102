//! Forecast aggregation service
//!
//! Sequences location resolution, source selection, the upstream fetches and
//! normalization for one request. Any failure ends the request; there is no
//! partial result and no retry.

use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::Result;
use crate::config::DefaultsConfig;
use crate::error::ForecastError;
use crate::location_resolver::LocationResolver;
use crate::models::{CurrentConditions, ForecastResult, Location};
use crate::normalizer::{self, FetchedSources};
use crate::selector::{Selection, select_sources};
use crate::weather::{
    AtmosphericFieldSet, AtmosphericRequest, ForecastDays, MarineRequest, WeatherSource,
};

/// Where the forecast is wanted
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocationQuery {
    /// Already resolved coordinates, typically picked from a search result
    Coordinates {
        latitude: f64,
        longitude: f64,
        #[serde(default, alias = "local")]
        label: Option<String>,
    },
    /// Free-text place name resolved to its best match
    Name {
        #[serde(alias = "cidade")]
        name: String,
    },
}

/// Inbound forecast request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastRequest {
    #[serde(flatten)]
    pub location: LocationQuery,
    #[serde(default)]
    pub is_coastal: bool,
    #[serde(default)]
    pub forecast_days: Option<i64>,
}

impl ForecastRequest {
    #[must_use]
    pub fn for_name<S: Into<String>>(name: S, is_coastal: bool) -> Self {
        Self {
            location: LocationQuery::Name { name: name.into() },
            is_coastal,
            forecast_days: None,
        }
    }

    #[must_use]
    pub fn for_coordinates(latitude: f64, longitude: f64, is_coastal: bool) -> Self {
        Self {
            location: LocationQuery::Coordinates {
                latitude,
                longitude,
                label: None,
            },
            is_coastal,
            forecast_days: None,
        }
    }

    #[must_use]
    pub fn with_forecast_days(mut self, days: i64) -> Self {
        self.forecast_days = Some(days);
        self
    }
}

/// Coordinates and label a forecast is produced for
#[derive(Debug, Clone)]
struct Target {
    latitude: f64,
    longitude: f64,
    label: String,
}

/// Aggregation service
pub struct ForecastService {
    source: Arc<dyn WeatherSource>,
    default_forecast_days: u8,
    search_count: u8,
}

impl ForecastService {
    #[must_use]
    pub fn new(source: Arc<dyn WeatherSource>, defaults: &DefaultsConfig) -> Self {
        Self {
            source,
            default_forecast_days: defaults.forecast_days,
            search_count: defaults.search_count,
        }
    }

    /// Candidate locations for the interactive city picker
    #[instrument(skip(self))]
    pub async fn search_locations(&self, name: &str) -> Result<Vec<Location>> {
        let locations =
            LocationResolver::search(self.source.as_ref(), name, self.search_count).await?;
        info!("City search for '{}' returned {} candidates", name, locations.len());
        Ok(locations)
    }

    /// Multi-day forecast
    #[instrument(skip(self, request), fields(coastal = request.is_coastal))]
    pub async fn get_forecast(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        let start_time = Instant::now();
        let forecast_days = ForecastDays::clamped(
            request
                .forecast_days
                .unwrap_or_else(|| i64::from(self.default_forecast_days)),
        );

        let target = self.locate(&request.location).await?;
        let selection = select_sources(request.is_coastal);
        let atmospheric = AtmosphericRequest {
            latitude: target.latitude,
            longitude: target.longitude,
            forecast_days,
            fields: AtmosphericFieldSet::multi_day(),
        };

        let sources = self.fetch_sources(&atmospheric, selection).await?;
        let days = normalizer::normalize_days(&sources, forecast_days)
            .inspect_err(|e| error!(location = %target.label, error = %e, "Normalization failed"))?;

        info!(
            "Built {}-day forecast for {} in {:.3}s",
            days.len(),
            target.label,
            start_time.elapsed().as_secs_f64()
        );

        Ok(ForecastResult {
            location_label: target.label,
            days,
        })
    }

    /// Snapshot of the current conditions
    #[instrument(skip(self, request), fields(coastal = request.is_coastal))]
    pub async fn get_current_conditions(
        &self,
        request: &ForecastRequest,
    ) -> Result<CurrentConditions> {
        let start_time = Instant::now();
        let target = self.locate(&request.location).await?;
        let selection = select_sources(request.is_coastal);
        let atmospheric = AtmosphericRequest {
            latitude: target.latitude,
            longitude: target.longitude,
            forecast_days: ForecastDays::clamped(1),
            fields: AtmosphericFieldSet::current_conditions(),
        };

        let sources = self.fetch_sources(&atmospheric, selection).await?;
        let label = target.label.clone();
        let snapshot = normalizer::normalize_current(&sources, target.label)
            .inspect_err(|e| error!(location = %label, error = %e, "Normalization failed"))?;

        info!(
            "Built current conditions for {} in {:.3}s",
            snapshot.location_label,
            start_time.elapsed().as_secs_f64()
        );
        Ok(snapshot)
    }

    async fn locate(&self, query: &LocationQuery) -> Result<Target> {
        match query {
            LocationQuery::Name { name } => {
                let location = LocationResolver::resolve(self.source.as_ref(), name).await?;
                Ok(Target {
                    latitude: location.latitude,
                    longitude: location.longitude,
                    label: location.display_name,
                })
            }
            LocationQuery::Coordinates {
                latitude,
                longitude,
                label,
            } => {
                validate_coordinates(*latitude, *longitude)?;
                Ok(Target {
                    latitude: *latitude,
                    longitude: *longitude,
                    label: label
                        .clone()
                        .filter(|label| !label.trim().is_empty())
                        .unwrap_or_else(|| Location::format_coordinates(*latitude, *longitude)),
                })
            }
        }
    }

    /// Atmospheric first, then marine for coastal requests, so a failed
    /// atmospheric fetch never reaches the marine provider.
    async fn fetch_sources(
        &self,
        atmospheric_request: &AtmosphericRequest,
        selection: Selection,
    ) -> Result<FetchedSources> {
        let atmospheric = self.source.fetch_atmospheric(atmospheric_request).await?;

        match selection {
            Selection::Standard => Ok(FetchedSources::Standard { atmospheric }),
            Selection::Coastal => {
                let marine_request = MarineRequest::new(
                    atmospheric_request.latitude,
                    atmospheric_request.longitude,
                );
                let marine = self.source.fetch_marine(&marine_request).await?;
                Ok(FetchedSources::Coastal {
                    atmospheric,
                    marine,
                })
            }
        }
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ForecastError::invalid_request(format!(
            "Latitude must be between -90 and 90, got: {latitude}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ForecastError::invalid_request(format!(
            "Longitude must be between -180 and 180, got: {longitude}"
        )));
    }
    Ok(())
}
