mod cli;
mod config;
mod error;
mod logging;
mod ui;

use crate::cli::Cli;
use crate::config::DataSource;
use crate::error::{CliError, Result};
use crate::ui::Prompter;
use clap::Parser;
use muatten::{Catalog, DataFiles, Identification, validate_energy};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, info};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let Err(e) = run(cli) else {
        return ExitCode::SUCCESS;
    };
    let status = report_failure(&e, &mut io::stdout(), &mut io::stderr()).unwrap_or(1);
    ExitCode::from(status)
}

/// Print a failed run and return its exit status.
///
/// Query failures print one line on `out` and return 0; anything else is
/// printed on `err` and returns 1.
fn report_failure(e: &CliError, out: &mut impl Write, err: &mut impl Write) -> io::Result<u8> {
    if let Some(query_error) = e.query_error() {
        debug!("Query failed: {query_error}");
        writeln!(out, "{}", ui::query_failure_message(query_error))?;
        Ok(0)
    } else {
        debug!("Run failed: {e:?}");
        writeln!(err, "Error: {e}")?;
        Ok(1)
    }
}

fn open_catalog(source: &DataSource, files: &DataFiles) -> Result<Catalog> {
    let catalog = match source {
        DataSource::Dir(dir) => {
            info!("Loading tables from {}", dir.display());
            Catalog::from_dir(dir, files)?
        }
        DataSource::Snapshot(path) => {
            info!("Loading snapshot {}", path.display());
            Catalog::open_snapshot(path)?
        }
    };
    info!(
        "Catalog ready: {} elements, {} compounds.",
        catalog.element_count(),
        catalog.compound_count()
    );
    Ok(catalog)
}

fn run(cli: Cli) -> Result<()> {
    info!("muatten v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = config::load(cli.config.as_deref())?;
    let source = config.data_source(cli.data_dir, cli.snapshot);
    let catalog = open_catalog(&source, &config.files)?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());

    let material = match catalog.identify(cli.material.as_deref())? {
        Identification::NeedsSelection => prompter.choose_material(&catalog)?,
        Identification::Material(name) => name,
    };
    debug!("Material resolved to '{material}'.");

    let thickness = match cli.thickness {
        Some(t) => t,
        None => prompter.ask_number("--- Material thickness [cm]: ", "thickness")?,
    };
    let energy = match cli.energy {
        Some(e) => e,
        None => prompter.ask_number("--- Photon energy [keV]: ", "energy")?,
    };
    let energy = validate_energy(energy)?;

    let result = catalog.transmission(&material, thickness, energy)?;
    println!("{}", ui::format_report(&result));
    Ok(())
}
