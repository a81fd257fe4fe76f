#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the district weather server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the storage and upstream types to allow independent evolution of
//! the API contract. Field names are `snake_case` on the wire.

use district_weather_forecast_models::{CurrentWeather, ForecastSample};
use district_weather_history_models::HistoryRecord;
use serde::{Deserialize, Serialize};

/// Response from the weather endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiWeather {
    /// Current conditions; every key is present, absent values are `null`.
    pub current: CurrentWeather,
    /// Up to five hourly samples following the current hour.
    pub forecast: Vec<ForecastSample>,
    /// The district that was looked up.
    pub district: String,
}

/// A past lookup as returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiHistoryEntry {
    /// District name.
    pub district: String,
    /// Temperature at lookup time.
    pub temperature: Option<f64>,
    /// Condition summary.
    pub condition: String,
    /// When the lookup was recorded.
    pub timestamp: String,
}

impl From<HistoryRecord> for ApiHistoryEntry {
    fn from(record: HistoryRecord) -> Self {
        Self {
            district: record.district,
            temperature: record.temperature,
            condition: record.condition,
            timestamp: record.timestamp,
        }
    }
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable failure description.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_entry_wire_shape() {
        let entry = ApiHistoryEntry::from(HistoryRecord {
            district: "Alappuzha".to_string(),
            temperature: None,
            condition: "Unknown".to_string(),
            timestamp: "2024-06-01T08:30:00.000000Z".to_string(),
        });

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "district": "Alappuzha",
                "temperature": null,
                "condition": "Unknown",
                "timestamp": "2024-06-01T08:30:00.000000Z"
            })
        );
    }

    #[test]
    fn error_body_shape() {
        let body = ApiErrorBody {
            error: "Invalid district".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Invalid district"}"#
        );
    }
}
