//! Normalized forecast records returned to the presentation client

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Forecast for a single day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    /// Local calendar date of the forecast
    pub date: NaiveDate,
    /// Maximum air temperature in Celsius
    pub temperature_max: f64,
    /// Minimum air temperature in Celsius
    pub temperature_min: f64,
    pub uv_index_max: f64,
    /// Precipitation probability (0-100%)
    pub precipitation_probability_max: f64,
    /// Maximum wave height in meters, coastal requests only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave_height_max: Option<f64>,
    /// Apparent temperature of the first hourly sample of the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<f64>,
}

/// Multi-day forecast for one location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub location_label: String,
    /// Days in upstream order
    pub days: Vec<ForecastDay>,
}

/// Flattened snapshot of the conditions right now
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub location_label: String,
    /// Air temperature in Celsius
    pub air_temperature: f64,
    /// Relative humidity (0-100%), zero for coastal requests
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    pub is_raining: bool,
    /// Wave height in meters, zero when not coastal
    pub wave_height: f64,
    /// Sea surface temperature in Celsius, zero when not coastal
    pub water_temperature: f64,
    pub uv_index: f64,
    /// Mean precipitation probability for today (0-100%)
    pub precipitation_probability_mean: f64,
    pub apparent_temperature: f64,
}
