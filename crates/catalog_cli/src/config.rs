//! Server configuration from command-line flags and environment.
//!
//! # Invariants
//! - Every setting has a flag; persistent ones also read `CATALOG_*`.
//! - `--in-memory` wins over any database path.

use catalog_core::default_log_level;
use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "catalog.sqlite3";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4000";

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// SQLite database file; created and migrated when missing.
    #[arg(long, env = "CATALOG_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Keep the catalog in memory; nothing survives a restart.
    #[arg(long)]
    pub in_memory: bool,

    #[arg(long, env = "CATALOG_LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "CATALOG_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset.
    #[arg(long, env = "CATALOG_LOG_DIR")]
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl DbLocation {
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Memory => ":memory:".to_string(),
        }
    }
}

/// Validated settings for `catalog_cli serve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db: DbLocation,
    pub listen: SocketAddr,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_args(args: ServeArgs) -> Self {
        let db = if args.in_memory {
            DbLocation::Memory
        } else {
            DbLocation::File(args.db_path)
        };

        let log_level = args
            .log_level
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = args.log_dir.filter(|dir| !dir.trim().is_empty());

        Self {
            db,
            listen: args.listen,
            log_level,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DbLocation, ServeArgs, ServerConfig};
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        serve: ServeArgs,
    }

    fn parse(args: &[&str]) -> ServerConfig {
        let argv = std::iter::once("catalog_cli").chain(args.iter().copied());
        let cli = TestCli::try_parse_from(argv).unwrap();
        ServerConfig::from_args(cli.serve)
    }

    #[test]
    fn in_memory_overrides_db_path() {
        let config = parse(&["--db-path", "books.db", "--in-memory"]);
        assert_eq!(config.db, DbLocation::Memory);
        assert_eq!(config.db.describe(), ":memory:");
    }

    #[test]
    fn explicit_flags_are_kept() {
        let config = parse(&[
            "--db-path",
            "books.db",
            "--listen",
            "0.0.0.0:8080",
            "--log-level",
            "warn",
        ]);
        assert_eq!(config.db, DbLocation::File("books.db".into()));
        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_log_settings_fall_back_to_defaults() {
        let config = parse(&["--in-memory", "--log-level", " ", "--log-dir", ""]);
        assert_eq!(config.log_level, catalog_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn malformed_listen_address_is_rejected_by_the_parser() {
        let result = TestCli::try_parse_from(["catalog_cli", "--listen", "not-an-addr"]);
        assert!(result.is_err());
    }
}
