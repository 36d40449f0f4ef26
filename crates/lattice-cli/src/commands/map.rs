use crate::cli::MapArgs;
use crate::config::builder::build_map_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use latticegpm::core::io::json::JsonRecord;
use latticegpm::engine::progress::ProgressReporter;
use latticegpm::workflows;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: MapArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_map_config(&args)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Building genotype-phenotype map between {} and {}...",
        app.wildtype, app.mutant
    );
    info!("Invoking the core map workflow...");
    let lattice = workflows::map::build(&app.wildtype, &app.mutant, &app.core_config, &reporter)?;

    let folded = lattice.folded().iter().filter(|&&f| f).count();
    if folded == 0 {
        warn!("No genotype in the map has a native state.");
    }
    println!(
        "Map complete: {} genotypes, {} folded, phenotype '{}'.",
        lattice.len(),
        folded,
        lattice.phenotype_kind()
    );

    if args.plain {
        write_record(lattice.map(), &args.output)?;
    } else {
        write_record(&lattice, &args.output)?;
    }
    println!("Map written to: {}", args.output.display());
    Ok(())
}

fn write_record(record: &impl JsonRecord, path: &Path) -> Result<()> {
    info!("Writing map to {:?}", path);
    record
        .write_to_path(path)
        .map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
}
