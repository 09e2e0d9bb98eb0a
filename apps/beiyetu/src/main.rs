//! # Bei Yetu Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            beiyetu                                      │
//! │                                                                         │
//! │  main.rs ────► parse args, start logging, call beiyetu_lib::run        │
//! │                                                                         │
//! │  lib.rs ─────► database path, connect, seed, build state               │
//! │                                                                         │
//! │  cli.rs ─────► one-shot command or interactive shell                   │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  beiyetu.db (local file, WAL mode)                               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use beiyetu_lib::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    beiyetu_lib::init_tracing();

    match beiyetu_lib::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
