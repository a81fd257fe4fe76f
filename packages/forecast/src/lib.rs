#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Upstream forecast retrieval and reshaping.
//!
//! [`client::OpenMeteoClient`] performs the single outbound request per
//! lookup. [`window`] slices the next few hours out of the 48-hour series,
//! and [`WeatherReport::from_response`] combines both into the payload
//! served to clients.

pub mod client;
pub mod window;

use district_weather_forecast_models::{CurrentWeather, ForecastSample, OpenMeteoResponse};
use thiserror::Error;

pub use client::OpenMeteoClient;

/// Errors from the upstream weather provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Upstream returned status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL, without query string.
        url: String,
    },

    /// The response body could not be decoded.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the decoding failure.
        message: String,
    },
}

/// Current conditions plus the short-range forecast for one lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Current conditions.
    pub current: CurrentWeather,
    /// Up to [`window::WINDOW_HOURS`] hourly samples after the reference hour.
    pub forecast: Vec<ForecastSample>,
}

impl WeatherReport {
    /// Shapes an upstream response, windowing the hourly series from
    /// `reference_hour` (0-23, local to the district).
    #[must_use]
    pub fn from_response(response: &OpenMeteoResponse, reference_hour: u32) -> Self {
        Self {
            current: CurrentWeather::from(&response.current),
            forecast: window::forecast_window(&response.hourly, reference_hour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_combines_current_and_window() {
        let response: OpenMeteoResponse = serde_json::from_value(serde_json::json!({
            "current": { "temperature_2m": 27.5, "weather_code": 3 },
            "hourly": {
                "time": (0..48).map(|h| format!("T{h:02}")).collect::<Vec<_>>(),
                "temperature_2m": vec![20.0; 48],
                "relative_humidity_2m": vec![80.0; 48],
                "wind_speed_10m": vec![3.0; 48],
                "cloud_cover": vec![50.0; 48]
            }
        }))
        .unwrap();

        let report = WeatherReport::from_response(&response, 10);
        assert_eq!(report.current.temperature, Some(27.5));
        assert_eq!(report.current.condition_code, Some(3));
        assert_eq!(report.forecast.len(), 5);
        assert_eq!(report.forecast[0].time, "T11");
    }
}
