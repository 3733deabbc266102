//! Upstream weather providers
//!
//! The [`WeatherSource`] trait is the seam between the aggregation service
//! and the HTTP providers. [`open_meteo::OpenMeteoClient`] is the production
//! implementation.

use async_trait::async_trait;

use crate::Result;
use crate::models::Location;

pub mod fields;
pub mod open_meteo;
pub mod payloads;

pub use fields::{AtmosphericFieldSet, MarineFieldSet};
pub use open_meteo::OpenMeteoClient;
pub use payloads::{RawAtmosphericPayload, RawMarinePayload};

/// Forecast horizon accepted by the upstream, always within `[1, 16]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastDays(u8);

impl ForecastDays {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 16;

    /// Coerce any requested day count onto the nearest supported bound.
    #[must_use]
    pub fn clamped(days: i64) -> Self {
        let days = days.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(days).unwrap_or(Self::MAX))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Parameters of one atmospheric fetch
#[derive(Debug, Clone)]
pub struct AtmosphericRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub forecast_days: ForecastDays,
    pub fields: AtmosphericFieldSet,
}

/// Parameters of one marine fetch
#[derive(Debug, Clone)]
pub struct MarineRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub fields: MarineFieldSet,
}

impl MarineRequest {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            fields: MarineFieldSet::default(),
        }
    }
}

/// Source of geocoding, atmospheric and marine data
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Look up to `count` candidates for a free-text place name, in
    /// upstream ranking order.
    async fn geocode(&self, name: &str, count: u8) -> Result<Vec<Location>>;

    async fn fetch_atmospheric(&self, request: &AtmosphericRequest)
    -> Result<RawAtmosphericPayload>;

    async fn fetch_marine(&self, request: &MarineRequest) -> Result<RawMarinePayload>;
}
