#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for auditing the weather lookup history.
//!
//! ```text
//! district_weather_history list [--limit 10] [--json]
//! district_weather_history count
//! ```
//!
//! Running with no subcommand lists the most recent lookups. The database
//! path is taken from `--db`, then `HISTORY_DB_PATH`, then the default.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use district_weather_history::{DEFAULT_DB_PATH, DEFAULT_RECENT_LIMIT, HistoryStore};

#[derive(Parser)]
#[command(
    name = "district_weather_history",
    about = "Browse the district weather lookup history"
)]
struct Cli {
    /// Path to the history database
    #[arg(long, env = "HISTORY_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent lookups, newest first
    List {
        /// Maximum number of lookups to show
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: u32,
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the total number of stored lookups
    Count,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let store = HistoryStore::open(&cli.db).await?;

    match cli.command.unwrap_or(Commands::List {
        limit: DEFAULT_RECENT_LIMIT,
        json: false,
    }) {
        Commands::List { limit, json } => {
            let records = store.recent(limit).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            if records.is_empty() {
                println!("No lookups recorded.");
                return Ok(());
            }

            println!(
                "{:<28} {:<20} {:>7}  CONDITION",
                "TIMESTAMP", "DISTRICT", "TEMP"
            );
            println!("{}", "-".repeat(90));

            for record in &records {
                let temperature = record
                    .temperature
                    .map_or_else(|| "-".to_string(), |t| format!("{t:.1}"));
                println!(
                    "{:<28} {:<20} {:>7}  {}",
                    record.timestamp, record.district, temperature, record.condition
                );
            }

            println!("\n{} lookup(s)", records.len());
        }
        Commands::Count => {
            println!("{}", store.count().await?);
        }
    }

    Ok(())
}
