//! Location Resolution Module
//!
//! Turns free-text place names into geocoded [`Location`] candidates. The
//! same upstream lookup backs two contracts: an exact single-match resolve
//! that fails when nothing is found, and an interactive search that simply
//! returns whatever the geocoder ranked.

use tracing::{debug, warn};

use crate::Result;
use crate::error::ForecastError;
use crate::models::Location;
use crate::weather::WeatherSource;

/// Candidates requested for a single-match resolve
pub const EXACT_MATCH_COUNT: u8 = 1;

/// Service for resolving place names
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a place name to its best-ranked candidate.
    pub async fn resolve(source: &dyn WeatherSource, name: &str) -> Result<Location> {
        let name = Self::validated_name(name)?;
        debug!("Geocoding location name: {}", name);

        let location = source
            .geocode(name, EXACT_MATCH_COUNT)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!("Location not found: {}", name);
                ForecastError::not_found(name)
            })?;

        debug!(
            "Resolved location: {} at ({:.4}, {:.4})",
            location.display_name, location.latitude, location.longitude
        );
        Ok(location)
    }

    /// Search up to `count` candidates; no match is an empty list.
    pub async fn search(
        source: &dyn WeatherSource,
        name: &str,
        count: u8,
    ) -> Result<Vec<Location>> {
        let name = Self::validated_name(name)?;
        debug!("Searching up to {} candidates for: {}", count, name);
        source.geocode(name, count).await
    }

    fn validated_name(name: &str) -> Result<&str> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ForecastError::invalid_request("Location name cannot be empty"));
        }
        Ok(name)
    }
}
