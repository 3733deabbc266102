//! Raw upstream response structures
//!
//! These mirror the JSON the providers return. Every block and array is
//! optional because the upstream omits whatever it cannot serve; the
//! normalizer decides which absences are fatal.

use serde::Deserialize;

use crate::models::Location;

/// Geocoding search response
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location::new(
            result.id,
            result.name,
            result.latitude,
            result.longitude,
            result.country.unwrap_or_default(),
            result.admin1,
        )
    }
}

/// A positional series where individual samples may be null
pub type Series = Vec<Option<f64>>;

/// Atmospheric forecast response
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawAtmosphericPayload {
    pub current: Option<CurrentBlock>,
    pub daily: Option<AtmosphericDaily>,
    pub hourly: Option<AtmosphericHourly>,
}

/// Instantaneous readings
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CurrentBlock {
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub rain: Option<f64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AtmosphericDaily {
    #[serde(default)]
    pub time: Vec<String>,
    pub temperature_2m_max: Option<Series>,
    pub temperature_2m_min: Option<Series>,
    pub uv_index_max: Option<Series>,
    pub precipitation_probability_max: Option<Series>,
    pub precipitation_probability_mean: Option<Series>,
}

/// Hourly samples, 24 per day
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AtmosphericHourly {
    #[serde(default)]
    pub time: Vec<String>,
    pub apparent_temperature: Option<Series>,
}

/// Marine forecast response
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawMarinePayload {
    pub daily: Option<MarineDaily>,
    pub hourly: Option<MarineHourly>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct MarineDaily {
    #[serde(default)]
    pub time: Vec<String>,
    pub wave_height_max: Option<Series>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct MarineHourly {
    #[serde(default)]
    pub time: Vec<String>,
    pub sea_surface_temperature: Option<Series>,
}
