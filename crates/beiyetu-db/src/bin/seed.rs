//! # Seed the Default Catalog
//!
//! Creates (or opens) a database file, applies migrations and inserts the
//! default catalog if it has no categories yet.
//!
//! ## Usage
//! ```bash
//! cargo run -p beiyetu-db --bin seed -- --db ./data/beiyetu.db
//!
//! # Same thing through the environment
//! BEIYETU_DB_PATH=./data/beiyetu.db cargo run -p beiyetu-db --bin seed
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use beiyetu_db::migrations::migration_status;
use beiyetu_db::{seed_defaults, Database, DbConfig, DbResult, SeedOutcome};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "seed", version, about = "Seed a Bei Yetu database with the default catalog")]
struct Args {
    /// Database file to create or open
    #[arg(long, env = "BEIYETU_DB_PATH", default_value = "beiyetu.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,beiyetu_db=debug,sqlx=warn")),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Seeding failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> DbResult<()> {
    if let Some(parent) = args.db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| beiyetu_db::DbError::ConnectionFailed(e.to_string()))?;
    }

    let db = Database::new(DbConfig::new(&args.db)).await?;

    let (total, applied) = migration_status(db.pool()).await?;
    info!(total, applied, "Migration status");

    match seed_defaults(&db).await? {
        SeedOutcome::Skipped { existing_categories } => {
            info!(
                path = %args.db.display(),
                existing_categories,
                "Database already has a catalog"
            );
        }
        SeedOutcome::Seeded(report) => {
            info!(
                path = %args.db.display(),
                products = report.products,
                listings = report.listings,
                "Database seeded"
            );
        }
    }

    db.close().await;
    Ok(())
}
