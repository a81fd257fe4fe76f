//! Request failure kinds and their HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use district_weather_forecast::UpstreamError;
use district_weather_history::HistoryError;
use district_weather_server_models::ApiErrorBody;
use thiserror::Error;

/// Why a request failed.
///
/// Only [`ApiError::Validation`] is the caller's fault. Upstream and storage
/// failures share the same 500 wire shape and differ only in message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unrecognised district. Raised before any side effect.
    #[error("Invalid district")]
    Validation,

    /// Provider unreachable, timed out, non-2xx, or malformed payload.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// History store unavailable or write failed.
    #[error(transparent)]
    Storage(#[from] HistoryError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            error: self.to_string(),
        })
    }
}
