//! Data models for the forecast service
//!
//! This module contains the core domain models organized by concern:
//! - Location: resolved geographic candidates
//! - Forecast: normalized per-day and current-conditions records

pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use forecast::{CurrentConditions, ForecastDay, ForecastResult};
pub use location::Location;
