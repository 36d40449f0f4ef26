mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!(
        "🚀 latticegpm CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        configure_thread_pool(num_threads)?;
    }

    let command_result = match cli.command {
        Commands::Score(args) => {
            info!("Dispatching to 'score' command.");
            commands::score::run(args)
        }
        Commands::Thermo(args) => {
            info!("Dispatching to 'thermo' command.");
            commands::thermo::run(args)
        }
        Commands::Map(args) => {
            info!("Dispatching to 'map' command.");
            commands::map::run(args, cli.quiet)
        }
        Commands::Draw(args) => {
            info!("Dispatching to 'draw' command.");
            commands::draw::run(args)
        }
        Commands::Search(args) => {
            info!("Dispatching to 'search' command.");
            commands::search::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    command_result
}

#[cfg(feature = "parallel")]
fn configure_thread_pool(num_threads: usize) -> Result<()> {
    info!(
        "Setting Rayon global thread pool to {} threads.",
        num_threads
    );
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| {
            error::CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
        })
}

#[cfg(not(feature = "parallel"))]
fn configure_thread_pool(num_threads: usize) -> Result<()> {
    tracing::warn!(
        "Ignoring --threads {}: built without the 'parallel' feature.",
        num_threads
    );
    Ok(())
}
