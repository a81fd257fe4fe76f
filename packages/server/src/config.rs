//! Server configuration read from the environment at startup.

use std::path::PathBuf;

use district_weather_forecast::client::DEFAULT_BASE_URL;
use district_weather_history::DEFAULT_DB_PATH;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default directory for the landing and results pages.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Immutable server settings, built once before the server starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to listen on (`PORT`).
    pub port: u16,
    /// `SQLite` file holding the lookup history (`HISTORY_DB_PATH`).
    pub history_db_path: PathBuf,
    /// Forecast API base URL (`OPEN_METEO_BASE_URL`).
    pub upstream_base_url: String,
    /// Directory served for the static pages (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            history_db_path: PathBuf::from(DEFAULT_DB_PATH),
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Reads settings from process environment variables, falling back to
    /// defaults for anything unset. An unparseable `PORT` is ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT value {raw:?}");
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            history_db_path: lookup("HISTORY_DB_PATH")
                .map_or(defaults.history_db_path, PathBuf::from),
            upstream_base_url: lookup("OPEN_METEO_BASE_URL").unwrap_or(defaults.upstream_base_url),
            static_dir: lookup("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
        }
    }
}
