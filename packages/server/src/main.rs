#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District weather API server binary.
//!
//! Reads `BIND_ADDR`, `PORT`, `HISTORY_DB_PATH`, `OPEN_METEO_BASE_URL` and
//! `STATIC_DIR` from the environment. Pass `--interactive` to be prompted
//! for the bind address and port instead.

use clap::Parser;
use district_weather_server::{ServerConfig, interactive, run_server};

#[derive(Parser)]
#[command(
    name = "district_weather_server",
    about = "Serve district weather lookups"
)]
struct Cli {
    /// Prompt for bind address and port before starting
    #[arg(short, long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let config = ServerConfig::from_env();

    if cli.interactive {
        interactive::run(config).await
    } else {
        run_server(config).await
    }
}
