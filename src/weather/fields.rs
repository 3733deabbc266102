//! Typed field names requested from the upstream forecast APIs

/// A field name that can be listed in an upstream query parameter
pub trait QueryField: Copy {
    fn as_str(self) -> &'static str;
}

/// Comma-join a field list the way the upstream expects it.
pub fn join_fields<F: QueryField>(fields: &[F]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentField {
    Temperature2m,
    RelativeHumidity2m,
    Rain,
    WindSpeed10m,
}

impl QueryField for CurrentField {
    fn as_str(self) -> &'static str {
        match self {
            CurrentField::Temperature2m => "temperature_2m",
            CurrentField::RelativeHumidity2m => "relative_humidity_2m",
            CurrentField::Rain => "rain",
            CurrentField::WindSpeed10m => "wind_speed_10m",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyField {
    Temperature2mMax,
    Temperature2mMin,
    UvIndexMax,
    PrecipitationProbabilityMax,
    PrecipitationProbabilityMean,
}

impl QueryField for DailyField {
    fn as_str(self) -> &'static str {
        match self {
            DailyField::Temperature2mMax => "temperature_2m_max",
            DailyField::Temperature2mMin => "temperature_2m_min",
            DailyField::UvIndexMax => "uv_index_max",
            DailyField::PrecipitationProbabilityMax => "precipitation_probability_max",
            DailyField::PrecipitationProbabilityMean => "precipitation_probability_mean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourlyField {
    ApparentTemperature,
}

impl QueryField for HourlyField {
    fn as_str(self) -> &'static str {
        match self {
            HourlyField::ApparentTemperature => "apparent_temperature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarineDailyField {
    WaveHeightMax,
}

impl QueryField for MarineDailyField {
    fn as_str(self) -> &'static str {
        match self {
            MarineDailyField::WaveHeightMax => "wave_height_max",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarineHourlyField {
    SeaSurfaceTemperature,
}

impl QueryField for MarineHourlyField {
    fn as_str(self) -> &'static str {
        match self {
            MarineHourlyField::SeaSurfaceTemperature => "sea_surface_temperature",
        }
    }
}

const CURRENT_FIELDS: [CurrentField; 4] = [
    CurrentField::Temperature2m,
    CurrentField::RelativeHumidity2m,
    CurrentField::Rain,
    CurrentField::WindSpeed10m,
];

/// Fields requested in one atmospheric fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtmosphericFieldSet {
    pub current: Vec<CurrentField>,
    pub daily: Vec<DailyField>,
    pub hourly: Vec<HourlyField>,
}

impl AtmosphericFieldSet {
    /// Field set behind the multi-day forecast
    #[must_use]
    pub fn multi_day() -> Self {
        Self {
            current: CURRENT_FIELDS.to_vec(),
            daily: vec![
                DailyField::Temperature2mMax,
                DailyField::Temperature2mMin,
                DailyField::UvIndexMax,
                DailyField::PrecipitationProbabilityMax,
            ],
            hourly: vec![HourlyField::ApparentTemperature],
        }
    }

    /// Field set behind the current-conditions snapshot
    #[must_use]
    pub fn current_conditions() -> Self {
        Self {
            current: CURRENT_FIELDS.to_vec(),
            daily: vec![
                DailyField::UvIndexMax,
                DailyField::PrecipitationProbabilityMean,
            ],
            hourly: vec![HourlyField::ApparentTemperature],
        }
    }
}

/// Fields requested in one marine fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarineFieldSet {
    pub daily: Vec<MarineDailyField>,
    pub hourly: Vec<MarineHourlyField>,
}

impl Default for MarineFieldSet {
    fn default() -> Self {
        Self {
            daily: vec![MarineDailyField::WaveHeightMax],
            hourly: vec![MarineHourlyField::SeaSurfaceTemperature],
        }
    }
}
