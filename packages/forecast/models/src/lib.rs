#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Weather payload types.
//!
//! Two families of types live here: the `OpenMeteo*` types mirror the
//! upstream forecast response, and [`CurrentWeather`] / [`ForecastSample`]
//! are the simplified shapes served to clients. Every upstream value is
//! optional since the provider may omit or null out any field.

use serde::{Deserialize, Serialize};

/// Variables requested in the upstream `current` block.
pub const CURRENT_VARIABLES: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "surface_pressure",
    "wind_speed_10m",
    "weather_code",
    "precipitation_probability",
    "apparent_temperature",
    "cloud_cover",
    "visibility",
];

/// Variables requested in the upstream `hourly` block.
pub const HOURLY_VARIABLES: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "wind_speed_10m",
    "cloud_cover",
];

/// Top-level upstream forecast response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenMeteoResponse {
    /// Offset of the resolved timezone from UTC.
    #[serde(default)]
    pub utc_offset_seconds: Option<i32>,
    /// Resolved IANA timezone name.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Current conditions.
    #[serde(default)]
    pub current: OpenMeteoCurrent,
    /// Hourly series, aligned by index.
    #[serde(default)]
    pub hourly: HourlySeries,
}

/// Upstream `current` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenMeteoCurrent {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub surface_pressure: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub visibility: Option<f64>,
    pub weather_code: Option<i32>,
}

/// Upstream `hourly` block: five parallel arrays indexed by hour offset
/// from local midnight of the request day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
}

/// Current conditions as served to clients.
///
/// Absent upstream values serialize as `null`; the key is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub rain_prob: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub visibility: Option<f64>,
    pub condition_code: Option<i32>,
}

impl From<&OpenMeteoCurrent> for CurrentWeather {
    fn from(current: &OpenMeteoCurrent) -> Self {
        Self {
            temperature: current.temperature_2m,
            feels_like: current.apparent_temperature,
            humidity: current.relative_humidity_2m,
            pressure: current.surface_pressure,
            wind_speed: current.wind_speed_10m,
            rain_prob: current.precipitation_probability,
            cloud_cover: current.cloud_cover,
            visibility: current.visibility,
            condition_code: current.weather_code,
        }
    }
}

impl CurrentWeather {
    /// Builds the free-text condition summary stored with each lookup.
    #[must_use]
    pub fn condition_summary(&self) -> String {
        condition_summary(self.condition_code)
    }
}

/// One hour of the short-range forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Local timestamp as supplied upstream (e.g. `2024-06-01T14:00`).
    pub time: String,
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub wind: Option<f64>,
    pub clouds: Option<f64>,
}

/// Returns the WMO description for a weather interpretation code, or
/// `None` for codes outside the WMO 4677 subset used by the provider.
///
/// See <https://open-meteo.com/en/docs#weathervariables>
#[must_use]
pub const fn describe_wmo_code(code: i32) -> Option<&'static str> {
    Some(match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => return None,
    })
}

/// Formats a weather code as the history condition string.
///
/// Known codes render as `"<description> (code <n>)"`, unrecognised codes
/// as `"Code <n>"`, and a missing code as `"Unknown"`.
#[must_use]
pub fn condition_summary(code: Option<i32>) -> String {
    match code {
        Some(code) => describe_wmo_code(code).map_or_else(
            || format!("Code {code}"),
            |description| format!("{description} (code {code})"),
        ),
        None => "Unknown".to_string(),
    }
}
