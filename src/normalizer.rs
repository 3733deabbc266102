//! Forecast normalization
//!
//! Reconciles the raw atmospheric and marine payloads into the canonical
//! [`ForecastDay`] list or a single [`CurrentConditions`] snapshot.
//!
//! The atmospheric `daily.time` array is the only authority on how many days
//! exist. Hourly samples are aligned to days with a fixed stride of 24, and
//! marine arrays are only ever read at indices the atmospheric source already
//! claims, never used to extend the result.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::Result;
use crate::error::{ForecastError, Upstream};
use crate::models::{CurrentConditions, ForecastDay};
use crate::selector::Selection;
use crate::weather::ForecastDays;
use crate::weather::payloads::{RawAtmosphericPayload, RawMarinePayload, Series};

/// Hourly samples per daily index
pub const HOURS_PER_DAY: usize = 24;

/// Raw payloads gathered for one request
#[derive(Debug, Clone)]
pub enum FetchedSources {
    Standard {
        atmospheric: RawAtmosphericPayload,
    },
    Coastal {
        atmospheric: RawAtmosphericPayload,
        marine: RawMarinePayload,
    },
}

impl FetchedSources {
    #[must_use]
    pub fn atmospheric(&self) -> &RawAtmosphericPayload {
        match self {
            FetchedSources::Standard { atmospheric }
            | FetchedSources::Coastal { atmospheric, .. } => atmospheric,
        }
    }

    #[must_use]
    pub fn marine(&self) -> Option<&RawMarinePayload> {
        match self {
            FetchedSources::Standard { .. } => None,
            FetchedSources::Coastal { marine, .. } => Some(marine),
        }
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        match self {
            FetchedSources::Standard { .. } => Selection::Standard,
            FetchedSources::Coastal { .. } => Selection::Coastal,
        }
    }
}

/// Value at `index`, treating a missing array, a short array and a null
/// sample alike as absent.
fn optional_at(series: Option<&Series>, index: usize) -> Option<f64> {
    series.and_then(|values| values.get(index).copied().flatten())
}

fn required_at(
    upstream: Upstream,
    block: &str,
    field: &str,
    series: Option<&Series>,
    index: usize,
) -> Result<f64> {
    optional_at(series, index).ok_or_else(|| {
        warn!(%upstream, block, field, index, "Required value missing from upstream response");
        ForecastError::malformed(upstream, format!("{block}.{field}[{index}] is missing"))
    })
}

fn parse_date(raw: &str, index: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        ForecastError::malformed(
            Upstream::Forecast,
            format!("daily.time[{index}] '{raw}' is not a date: {e}"),
        )
    })
}

/// Build one [`ForecastDay`] per entry of the atmospheric daily time array.
pub fn normalize_days(
    sources: &FetchedSources,
    requested_days: ForecastDays,
) -> Result<Vec<ForecastDay>> {
    let atmospheric = sources.atmospheric();
    let daily = atmospheric.daily.as_ref().ok_or_else(|| {
        ForecastError::malformed(Upstream::Forecast, "daily block is missing")
    })?;

    let num_days = daily.time.len();
    if num_days != usize::from(requested_days.get()) {
        warn!(
            requested = requested_days.get(),
            returned = num_days,
            "Upstream returned a different number of days than requested"
        );
    }

    let apparent = atmospheric
        .hourly
        .as_ref()
        .and_then(|hourly| hourly.apparent_temperature.as_ref());
    let wave_heights = sources
        .marine()
        .and_then(|marine| marine.daily.as_ref())
        .and_then(|daily| daily.wave_height_max.as_ref());

    let forecast = Upstream::Forecast;
    let mut days = Vec::with_capacity(num_days);
    for (i, raw_date) in daily.time.iter().enumerate() {
        let day = ForecastDay {
            date: parse_date(raw_date, i)?,
            temperature_max: required_at(
                forecast,
                "daily",
                "temperature_2m_max",
                daily.temperature_2m_max.as_ref(),
                i,
            )?,
            temperature_min: required_at(
                forecast,
                "daily",
                "temperature_2m_min",
                daily.temperature_2m_min.as_ref(),
                i,
            )?,
            uv_index_max: required_at(
                forecast,
                "daily",
                "uv_index_max",
                daily.uv_index_max.as_ref(),
                i,
            )?,
            precipitation_probability_max: required_at(
                forecast,
                "daily",
                "precipitation_probability_max",
                daily.precipitation_probability_max.as_ref(),
                i,
            )?,
            wave_height_max: optional_at(wave_heights, i),
            apparent_temperature: optional_at(apparent, i * HOURS_PER_DAY),
        };
        days.push(day);
    }

    debug!(
        days = days.len(),
        selection = ?sources.selection(),
        "Normalized daily forecast"
    );
    Ok(days)
}

/// Flatten the payloads into the current-conditions snapshot.
pub fn normalize_current(
    sources: &FetchedSources,
    location_label: String,
) -> Result<CurrentConditions> {
    let atmospheric = sources.atmospheric();
    let forecast = Upstream::Forecast;

    let current = atmospheric
        .current
        .as_ref()
        .ok_or_else(|| ForecastError::malformed(forecast, "current block is missing"))?;
    let missing_current =
        |field: &str| ForecastError::malformed(forecast, format!("current.{field} is missing"));

    let air_temperature = current
        .temperature_2m
        .ok_or_else(|| missing_current("temperature_2m"))?;
    let humidity = current
        .relative_humidity_2m
        .ok_or_else(|| missing_current("relative_humidity_2m"))?;
    let wind_speed = current
        .wind_speed_10m
        .ok_or_else(|| missing_current("wind_speed_10m"))?;
    let rain = current.rain.unwrap_or(0.0);

    let daily = atmospheric
        .daily
        .as_ref()
        .ok_or_else(|| ForecastError::malformed(forecast, "daily block is missing"))?;
    let uv_index = required_at(forecast, "daily", "uv_index_max", daily.uv_index_max.as_ref(), 0)?;
    let precipitation_probability_mean = required_at(
        forecast,
        "daily",
        "precipitation_probability_mean",
        daily.precipitation_probability_mean.as_ref(),
        0,
    )?;

    let apparent = atmospheric
        .hourly
        .as_ref()
        .and_then(|hourly| hourly.apparent_temperature.as_ref());
    let apparent_temperature = required_at(forecast, "hourly", "apparent_temperature", apparent, 0)?;

    let (humidity, water_temperature, wave_height) = match sources.marine() {
        // the marine source has no humidity, so coastal snapshots report none
        Some(marine) => {
            let water = optional_at(
                marine
                    .hourly
                    .as_ref()
                    .and_then(|hourly| hourly.sea_surface_temperature.as_ref()),
                0,
            );
            let wave = optional_at(
                marine
                    .daily
                    .as_ref()
                    .and_then(|daily| daily.wave_height_max.as_ref()),
                0,
            );
            if water.is_none() || wave.is_none() {
                debug!(
                    water = ?water,
                    wave = ?wave,
                    "Marine source has no data at index 0, reporting zero"
                );
            }
            (0.0, water.unwrap_or(0.0), wave.unwrap_or(0.0))
        }
        None => (humidity, 0.0, 0.0),
    };

    Ok(CurrentConditions {
        location_label,
        air_temperature,
        humidity,
        wind_speed,
        is_raining: rain > 0.0,
        wave_height,
        water_temperature,
        uv_index,
        precipitation_probability_mean,
        apparent_temperature,
    })
}
