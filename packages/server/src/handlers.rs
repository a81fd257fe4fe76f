//! HTTP handler functions for the district weather API.

use std::path::PathBuf;

use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, web};
use district_weather_district::District;
use district_weather_forecast::{WeatherReport, window};
use district_weather_history::DEFAULT_RECENT_LIMIT;
use district_weather_server_models::{ApiHealth, ApiHistoryEntry, ApiWeather};

use crate::{ApiError, AppState};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/districts`
///
/// Returns every district name in registry order.
pub async fn districts() -> HttpResponse {
    HttpResponse::Ok().json(district_weather_district::names())
}

/// `GET /api/weather?district=<name>`
///
/// Fetches current conditions and the next five hours for the district,
/// records the lookup, and returns the combined payload. When `district`
/// is repeated the first value wins.
pub async fn weather(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let name = district_param(req.query_string());
    let district = name
        .as_deref()
        .and_then(|name| District::from_name(name).ok())
        .ok_or_else(|| {
            log::debug!("Rejected weather request for {name:?}");
            ApiError::Validation
        })?;

    match lookup(&state, district).await {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(e) => {
            log::error!("Weather lookup for {district} failed: {e}");
            Err(e)
        }
    }
}

/// First `district` value in a raw query string.
fn district_param(query: &str) -> Option<String> {
    web::Query::<Vec<(String, String)>>::from_query(query)
        .ok()?
        .into_inner()
        .into_iter()
        .find_map(|(key, value)| (key == "district").then_some(value))
}

/// Fetch, shape, and record one lookup.
///
/// A failed history write fails the whole lookup so that a success
/// response always has a matching history entry.
async fn lookup(state: &AppState, district: District) -> Result<ApiWeather, ApiError> {
    let response = state.upstream.fetch(district.coordinates()).await?;

    let hour = window::local_hour(chrono::Utc::now(), response.utc_offset_seconds);
    let WeatherReport { current, forecast } = WeatherReport::from_response(&response, hour);

    log::debug!(
        "{district}: reference hour {hour}, {} forecast sample(s)",
        forecast.len()
    );

    let condition = current.condition_summary();
    state
        .history
        .append(district.as_ref(), current.temperature, &condition)
        .await?;

    Ok(ApiWeather {
        current,
        forecast,
        district: district.to_string(),
    })
}

/// `GET /api/history`
///
/// Returns the most recent lookups, newest first.
pub async fn history(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let records = state
        .history
        .recent(DEFAULT_RECENT_LIMIT)
        .await
        .inspect_err(|e| log::error!("Failed to read history: {e}"))?;

    let entries: Vec<ApiHistoryEntry> = records.into_iter().map(ApiHistoryEntry::from).collect();
    Ok(HttpResponse::Ok().json(entries))
}

/// `GET /result`
///
/// Serves the results page from the static directory.
pub async fn result_page(dir: web::Data<PagesDir>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(dir.0.join("result.html")).await?)
}

/// Directory holding the static pages.
#[derive(Debug, Clone)]
pub struct PagesDir(pub PathBuf);
