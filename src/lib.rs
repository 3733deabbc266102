//! `Coastcast` - weather aggregation for coastal and inland locations
//!
//! This library resolves place names, fetches atmospheric and marine
//! forecasts from upstream providers, and normalizes them into one
//! forecast record for a presentation client.

pub mod api;
pub mod config;
pub mod error;
pub mod forecast_service;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod selector;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::ForecastConfig;
pub use error::{ForecastError, Upstream};
pub use forecast_service::{ForecastRequest, ForecastService, LocationQuery};
pub use location_resolver::LocationResolver;
pub use models::{CurrentConditions, ForecastDay, ForecastResult, Location};
pub use selector::{Selection, select_sources};
pub use weather::{OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
