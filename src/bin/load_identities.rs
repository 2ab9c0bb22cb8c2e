//! Creates the person_info table if needed and loads the identity CSV,
//! one committed insert per row.

use std::fs::File;

use clap::Parser;

use txbridge::config::{CliArgs, Config};
use txbridge_core::IdentityLoader;
use txbridge_postgres::PostgresIdentityStore;

fn main() {
    let args = CliArgs::parse();
    let config = Config::load(&args);
    txbridge::logging::init(&config.logging);

    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "error transferring data");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = PostgresIdentityStore::connect(&config.postgres.connection_string())?;

    let file = File::open(&config.sources.identities_csv)?;
    let summary = IdentityLoader::new(&store).load(file)?;

    tracing::info!(
        rows = summary.rows_written,
        "data transfer completed successfully"
    );
    Ok(())
}
