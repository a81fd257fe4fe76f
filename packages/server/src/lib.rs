#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for district weather lookups.
//!
//! Serves the district list, per-district weather (current conditions plus
//! a five-hour forecast fetched from Open-Meteo), and the recent lookup
//! history persisted in `SQLite` at `data/weather_history.db`. The landing
//! and results pages are served as static files.

pub mod config;
mod error;
mod handlers;
pub mod interactive;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use district_weather_forecast::OpenMeteoClient;
use district_weather_history::HistoryStore;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Append-only lookup history.
    pub history: Arc<HistoryStore>,
    /// Client for the upstream forecast API.
    pub upstream: OpenMeteoClient,
}

/// Registers the `/api` routes.
///
/// Expects a `web::Data<AppState>` to be registered on the app.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/districts", web::get().to(handlers::districts))
            .route("/weather", web::get().to(handlers::weather))
            .route("/history", web::get().to(handlers::history)),
    );
}

/// Registers the static pages served from `static_dir`: `/result` and the
/// landing page at `/` (`home.html`) along with its assets.
pub fn configure_pages(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    cfg.app_data(web::Data::new(handlers::PagesDir(static_dir.to_path_buf())))
        .route("/result", web::get().to(handlers::result_page))
        .service(Files::new("/", static_dir).index_file("home.html"));
}

/// Starts the district weather API server.
///
/// Opens (and if needed creates) the history database, builds the
/// upstream client, and starts the Actix-Web HTTP server. This is a
/// regular async function — the caller is responsible for providing the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the history database cannot be
/// opened, the upstream client cannot be built, or the HTTP server fails
/// to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!(
        "Opening history database at {}...",
        config.history_db_path.display()
    );
    let history = HistoryStore::open(&config.history_db_path)
        .await
        .map_err(std::io::Error::other)?;

    let upstream =
        OpenMeteoClient::new(config.upstream_base_url.clone()).map_err(std::io::Error::other)?;
    log::info!("Using forecast API at {}", upstream.base_url());

    let state = web::Data::new(AppState {
        history: Arc::new(history),
        upstream,
    });
    let static_dir = config.static_dir.clone();

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            .configure(|cfg| configure_pages(cfg, &static_dir))
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
