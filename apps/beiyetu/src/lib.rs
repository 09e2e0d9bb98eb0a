//! # Bei Yetu Library
//!
//! Core library for the `beiyetu` price-comparison app: state, commands,
//! the command line and the startup sequence.
//!
//! ## Module Organization
//! ```text
//! beiyetu_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap arguments, one-shot commands, shell
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState bundle
//! │   ├── catalog.rs  ◄─── Product list / details view-models (watch)
//! │   ├── comments.rs ◄─── In-memory comments per product
//! │   ├── session.rs  ◄─── Stub sign-in
//! │   └── config.rs   ◄─── Currency and author defaults
//! ├── commands/
//! │   ├── product.rs  ◄─── search, best price, details, categories
//! │   ├── comment.rs  ◄─── add / list comments
//! │   ├── session.rs  ◄─── login / logout / whoami
//! │   └── config.rs   ◄─── get_config
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use beiyetu_db::{seed_defaults, Database, DbConfig, SeedOutcome};
use cli::{Cli, Command};
use error::ApiError;
use state::{AppState, ConfigState};

/// Runs the application for parsed arguments.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Determine Database Path ──────────────────────────────────────────► │
/// │     • --db / BEIYETU_DB_PATH                                            │
/// │     • else platform data dir: .../beiyetu/beiyetu.db                    │
/// │                                                                         │
/// │  2. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, foreign keys on                             │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  3. Seed Default Catalog ─────────────────────────────────────────────► │
/// │     • Only when no categories exist yet                                 │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • Catalog, Comments, Session, Config (from env)                     │
/// │                                                                         │
/// │  5. Execute Command ──────────────────────────────────────────────────► │
/// │     • One-shot subcommand, or the shell when none is given              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let db_path = get_database_path(cli.db)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    match seed_defaults(&db).await? {
        SeedOutcome::Seeded(report) => info!(?report, "Default catalog seeded"),
        SeedOutcome::Skipped { existing_categories } => {
            info!(existing_categories, "Catalog already present")
        }
    }

    let state = AppState::new(db, ConfigState::from_env());
    info!("State initialized");

    let mut stdout = std::io::stdout();
    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            cli::run_shell(&state, stdin, cli.json, &mut stdout).await
        }
        command => cli::execute(&state, &command, cli.json, &mut stdout).await,
    };

    state.catalog.database().close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays clean for results and `--json`.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=beiyetu=trace` - Show trace for beiyetu crates only
/// - Default: INFO, debug for beiyetu
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,beiyetu=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.beiyetu.beiyetu/beiyetu.db`
/// - **Windows**: `%APPDATA%\beiyetu\beiyetu\data\beiyetu.db`
/// - **Linux**: `~/.local/share/beiyetu/beiyetu.db`
///
/// An explicit path (`--db` or `BEIYETU_DB_PATH`) wins.
pub fn get_database_path(explicit: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let proj_dirs = ProjectDirs::from("com", "beiyetu", "beiyetu")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir).map_err(|e| {
        ApiError::internal(format!("Failed to create {}: {}", data_dir.display(), e))
    })?;

    Ok(data_dir.join("beiyetu.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_database_path_wins() {
        let path = get_database_path(Some(PathBuf::from("/tmp/catalog.db"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/catalog.db"));
    }
}
