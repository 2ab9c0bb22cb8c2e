//! Interactive cross-store query: full name and date range in, per-person
//! transaction report out.

use std::io::{self, Write};

use clap::Parser;

use txbridge::config::{CliArgs, Config};
use txbridge_core::{dates::parse_dmy, retrieve_transactions};
use txbridge_mongo::MongoTransactionStore;
use txbridge_postgres::PostgresIdentityStore;

fn main() {
    let args = CliArgs::parse();
    let config = Config::load(&args);
    txbridge::logging::init(&config.logging);

    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "error retrieving transactions");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let identities = PostgresIdentityStore::connect(&config.postgres.connection_string())?;
    let transactions = MongoTransactionStore::connect(
        &config.mongo.uri,
        &config.mongo.database,
        &config.mongo.collection,
    )?;

    let full_name = prompt("Please enter the full name: ")?;
    let from = parse_dmy(&prompt("Please enter the start date (DD/MM/YYYY): ")?)?;
    let to = parse_dmy(&prompt("Please enter the end date (DD/MM/YYYY): ")?)?;

    let report = retrieve_transactions(&identities, &transactions, &full_name, from, to)?;
    println!("{}", report);
    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
