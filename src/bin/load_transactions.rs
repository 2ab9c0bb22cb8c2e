//! Loads the transactions CSV into the document store in unordered batches.

use std::fs::File;

use clap::Parser;

use txbridge::config::{CliArgs, Config};
use txbridge_core::TransactionLoader;
use txbridge_mongo::MongoTransactionStore;

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
    let store = MongoTransactionStore::connect(
        &config.mongo.uri,
        &config.mongo.database,
        &config.mongo.collection,
    )?;

    let file = File::open(&config.sources.transactions_csv)?;
    let summary = TransactionLoader::new(&store).load(file)?;

    tracing::info!(
        rows = summary.rows_written,
        batches = summary.batches,
        "data transfer completed successfully"
    );
    Ok(())
}
