//! SilverAge Store — Admin Entry Point
//!
//! Small operational tool for the portal's data layer:
//!
//! - `silverage-store stats`  — print user and reservation aggregates
//! - `silverage-store export` — write the reservation CSV export
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (env-filter, level from config)
//! 3. Open file storage in the configured data directory
//! 4. Construct both stores and run the requested command

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::storage::FileStorage;
use usecases::{ReservationStore, UserStore, export};

fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config =
        config::loader::load_config("config.toml").context("Failed to load configuration")?;

    // ── 2. Initialize structured logging ────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.app.log_level)
            }),
        )
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.storage.data_dir,
        "Starting SilverAge store admin"
    );

    // ── 3. Open storage and construct the stores ────────────
    let storage = Arc::new(
        FileStorage::new(&config.storage.data_dir).context("Failed to open storage")?,
    );
    let users = UserStore::new(Arc::clone(&storage));
    let reservations = ReservationStore::new(Arc::clone(&storage));

    // ── 4. Run the requested command ────────────────────────
    let command = std::env::args().nth(1).unwrap_or_else(|| "stats".to_string());
    match command.as_str() {
        "stats" => {
            let user_stats = users.stats().context("Failed to read user stats")?;
            let reservation_stats = reservations
                .stats()
                .context("Failed to read reservation stats")?;
            println!("{}", serde_json::to_string_pretty(&user_stats)?);
            println!("{}", serde_json::to_string_pretty(&reservation_stats)?);
        }
        "export" => {
            let csv = reservations
                .export_csv()
                .context("Failed to render reservation export")?;
            std::fs::create_dir_all(&config.export.output_dir)
                .context("Failed to create export directory")?;
            let path = std::path::Path::new(&config.export.output_dir)
                .join(export::export_filename());
            std::fs::write(&path, csv).context("Failed to write export file")?;
            info!(path = %path.display(), "Reservation export written");
            println!("{}", path.display());
        }
        other => bail!("unknown command: {other} (expected `stats` or `export`)"),
    }

    Ok(())
}
