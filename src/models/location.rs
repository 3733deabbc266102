//! Location model for resolved geocoding candidates

use serde::{Deserialize, Serialize};

/// A geocoded place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Upstream identifier of the place
    pub id: u64,
    /// Place name as returned by the geocoder
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Country name in the requested locale
    pub country: String,
    /// First-level administrative region (state, district)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Label shown to the user, see [`Location::display_label`]
    pub display_name: String,
}

impl Location {
    #[must_use]
    pub fn new(
        id: u64,
        name: String,
        latitude: f64,
        longitude: f64,
        country: String,
        region: Option<String>,
    ) -> Self {
        let display_name = Self::display_label(&name, region.as_deref(), &country);
        Self {
            id,
            name,
            latitude,
            longitude,
            country,
            region,
            display_name,
        }
    }

    /// `"{name}, {region}, {country}"` with an empty middle segment kept
    /// when the region is unknown, e.g. `"Lisboa, , Portugal"`.
    #[must_use]
    pub fn display_label(name: &str, region: Option<&str>, country: &str) -> String {
        format!("{}, {}, {}", name, region.unwrap_or_default(), country)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
        format!("{latitude:.4}, {longitude:.4}")
    }
}
