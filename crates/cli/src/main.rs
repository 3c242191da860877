// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! queuectl: enqueue shell commands and run them with bounded retries

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;
mod shutdown;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{enqueue, list, status, worker};
use crate::config::Config;
use crate::exit_error::{ExitError, FAILURE};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("QUEUECTL_GIT_HASH"));

#[derive(Parser)]
#[command(
    name = "queuectl",
    version = VERSION,
    about = "A local job queue: enqueue shell commands, run them with retries",
    styles = color::styles()
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a job to the queue
    Enqueue(enqueue::EnqueueArgs),
    /// Process every pending job once, then exit
    Run,
    /// Keep processing pending jobs until interrupted
    Worker(worker::WorkerArgs),
    /// Show jobs and per-state counts
    Status(status::StatusArgs),
    /// Print jobs as JSON lines
    List(list::ListArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<ExitError>().map_or(FAILURE, |e| e.code);
        eprintln!("error: {err:#}");
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let _log_guard = match logging::init(&config.log_path) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {e:#}");
            None
        }
    };
    tracing::debug!(
        version = VERSION,
        store = %config.store_path.display(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Enqueue(args) => enqueue::handle(args, &config),
        Commands::Run => commands::run::handle(&config).await,
        Commands::Worker(args) => worker::handle(args, &config).await,
        Commands::Status(args) => status::handle(args, &config),
        Commands::List(args) => list::handle(args, &config),
    }
}
