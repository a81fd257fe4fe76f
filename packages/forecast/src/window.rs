//! Short-range forecast windowing.
//!
//! The hourly series starts at local midnight of the request day, so the
//! value at index `i` describes local hour `i` (wrapping into the next day
//! past 23). The window covers the five hours after the reference hour.

use chrono::{DateTime, FixedOffset, Local, Timelike as _, Utc};
use district_weather_forecast_models::{ForecastSample, HourlySeries};

/// Number of hourly samples in a full window.
pub const WINDOW_HOURS: usize = 5;

/// Returns the samples at indices `reference_hour + 1 ..= reference_hour + 5`,
/// zipping one value from each of the five arrays per index.
///
/// Indices past the end of any array truncate the window: the result is
/// the longest in-bounds prefix and may hold fewer than [`WINDOW_HOURS`]
/// samples, or none. Null values inside bounds are passed through.
#[must_use]
pub fn forecast_window(series: &HourlySeries, reference_hour: u32) -> Vec<ForecastSample> {
    let start = reference_hour as usize + 1;

    (start..start + WINDOW_HOURS)
        .map_while(|i| {
            Some(ForecastSample {
                time: series.time.get(i)?.clone(),
                temp: *series.temperature_2m.get(i)?,
                humidity: *series.relative_humidity_2m.get(i)?,
                wind: *series.wind_speed_10m.get(i)?,
                clouds: *series.cloud_cover.get(i)?,
            })
        })
        .collect()
}

/// Current hour (0-23) at the given UTC offset.
///
/// Falls back to the server's local timezone when the offset is missing or
/// out of range.
#[must_use]
pub fn local_hour(now: DateTime<Utc>, utc_offset_seconds: Option<i32>) -> u32 {
    utc_offset_seconds
        .and_then(FixedOffset::east_opt)
        .map_or_else(
            || now.with_timezone(&Local).hour(),
            |offset| now.with_timezone(&offset).hour(),
        )
}
