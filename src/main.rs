mod api;
mod cli;
mod config;
mod db;
mod models;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use api::Remote;
use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;

    let remote = Remote::from_config(&config.api)?;
    log::debug!(
        "Database at {:?}, network lookups {}",
        db_path,
        if remote.is_enabled() { "on" } else { "off" }
    );

    match cli.command {
        Some(Commands::Today) => handlers::handle_today(&conn, &config, &remote)?,
        Some(Commands::Fast { action }) => {
            handlers::handle_fast(&conn, &config, &remote, &action)?
        }
        Some(Commands::Quran { action }) => {
            handlers::handle_quran(&conn, &config, &remote, &action)?
        }
        Some(Commands::Deeds { action }) => handlers::handle_deeds(&conn, &config, &action)?,
        Some(Commands::Dhikr { action }) => handlers::handle_dhikr(&conn, &action)?,
        Some(Commands::Adhkar { category }) => handlers::handle_adhkar(&category)?,
        Some(Commands::Settings { action }) => handlers::handle_settings(&conn, &action)?,
        Some(Commands::Reset { yes }) => handlers::handle_reset(&conn, yes)?,

        // No subcommand → launch TUI
        None => tui::app::run(conn, config, remote)?,
    }

    Ok(())
}
