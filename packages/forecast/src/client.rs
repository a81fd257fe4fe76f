//! Open-Meteo forecast API client.
//!
//! One `GET /forecast` per lookup, requesting the current block and two
//! days of hourly data with the timezone resolved from the coordinates.
//!
//! See <https://open-meteo.com/en/docs>

use std::time::Duration;

use district_weather_district::Coordinates;
use district_weather_forecast_models::{CURRENT_VARIABLES, HOURLY_VARIABLES, OpenMeteoResponse};

use crate::UpstreamError;

/// Public Open-Meteo endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Per-request timeout, covering connect through body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Days of hourly data to request. Two days keep the window in bounds when
/// the reference hour is late in the day.
pub const FORECAST_DAYS: u8 = 2;

/// Client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Creates a client against `base_url` with the default
    /// [`REQUEST_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Creates a client against `base_url` with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches current conditions and the hourly series for `coordinates`.
    ///
    /// # Errors
    ///
    /// * [`UpstreamError::Http`] on transport failure or timeout
    /// * [`UpstreamError::Status`] on a non-2xx response
    /// * [`UpstreamError::Parse`] if the body is not a forecast document
    pub async fn fetch(
        &self,
        coordinates: Coordinates,
    ) -> Result<OpenMeteoResponse, UpstreamError> {
        let url = format!("{}/forecast", self.base_url);

        log::debug!(
            "Fetching forecast for ({}, {}) from {url}",
            coordinates.latitude,
            coordinates.longitude
        );

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current", CURRENT_VARIABLES.join(",")),
                ("hourly", HOURLY_VARIABLES.join(",")),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Parse {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const KOLLAM: Coordinates = Coordinates {
        latitude: 8.8932,
        longitude: 76.6141,
    };

    #[tokio::test]
    async fn sends_expected_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "8.8932"))
            .and(query_param("longitude", "76.6141"))
            .and(query_param("current", CURRENT_VARIABLES.join(",")))
            .and(query_param("hourly", HOURLY_VARIABLES.join(",")))
            .and(query_param("forecast_days", "2"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "utc_offset_seconds": 19800,
                "current": { "temperature_2m": 29.0, "weather_code": 2 },
                "hourly": { "time": ["2024-06-01T00:00"] }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OpenMeteoClient::new(mock_server.uri()).unwrap();
        let response = client.fetch(KOLLAM).await.unwrap();

        assert_eq!(response.utc_offset_seconds, Some(19800));
        assert_eq!(response.current.temperature_2m, Some(29.0));
        assert_eq!(response.hourly.time.len(), 1);
        assert!(response.hourly.temperature_2m.is_empty());
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let client = OpenMeteoClient::new("http://localhost:1234/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = OpenMeteoClient::new(mock_server.uri()).unwrap();
        let err = client.fetch(KOLLAM).await.unwrap_err();

        assert!(matches!(err, UpstreamError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = OpenMeteoClient::new(mock_server.uri()).unwrap();
        let err = client.fetch(KOLLAM).await.unwrap_err();

        assert!(matches!(err, UpstreamError::Parse { .. }));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client =
            OpenMeteoClient::with_timeout(mock_server.uri(), Duration::from_millis(100)).unwrap();
        let err = client.fetch(KOLLAM).await.unwrap_err();

        match err {
            UpstreamError::Http(e) => assert!(e.is_timeout(), "expected timeout, got {e}"),
            other => panic!("expected HTTP timeout, got {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_http_error() {
        let client = OpenMeteoClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch(KOLLAM).await.unwrap_err();

        assert!(matches!(err, UpstreamError::Http(_)));
    }
}
