//! Catalog server entry point.
//!
//! # Responsibility
//! - Parse configuration and bootstrap logging and storage.
//! - Serve the GraphQL API, or print its SDL for client tooling.

mod config;
mod server;

use catalog_core::{build_schema, export_sdl, init_logging, CatalogService, SharedDb};
use clap::{Parser, Subcommand};
use config::{DbLocation, ServeArgs, ServerConfig};
use log::{error, info};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "catalog_cli", version, about = "GraphQL catalog of authors and books")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the GraphQL API over HTTP.
    Serve(ServeArgs),
    /// Print the GraphQL schema definition.
    Schema,
}

#[tokio::main]
async fn main() -> ExitCode {
    match Cli::parse().command {
        Command::Schema => {
            println!("{}", export_sdl());
            ExitCode::SUCCESS
        }
        Command::Serve(args) => match run_server(ServerConfig::from_args(args)).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(message) => {
                eprintln!("catalog_cli: {message}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run_server(config: ServerConfig) -> Result<(), String> {
    init_logging(&config.log_level, config.log_dir.as_deref())?;
    info!(
        "event=server_start module=cli status=start db={} listen={}",
        config.db.describe(),
        config.listen
    );

    let opened = match &config.db {
        DbLocation::File(path) => SharedDb::open(path),
        DbLocation::Memory => SharedDb::open_in_memory(),
    };
    let db = opened.map_err(|err| {
        error!("event=server_start module=cli status=error error_code=db_open_failed error={err}");
        format!("failed to open catalog database `{}`: {err}", config.db.describe())
    })?;

    let schema = build_schema(CatalogService::new(db));
    server::serve(schema, config.listen)
        .await
        .map_err(|err| format!("server stopped with error: {err}"))
}
