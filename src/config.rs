use clap::Parser;
use serde::Deserialize;

/// Environment variable consulted for the PostgreSQL password when the
/// config file leaves it empty.
pub const PG_PASSWORD_ENV: &str = "TXBRIDGE_PG_PASSWORD";

#[derive(Parser, Debug)]
#[command(
    name = "txbridge",
    about = "Moves transaction and identity data between CSV files and the two stores"
)]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long, default_value = "txbridge.toml")]
    pub config: String,

    /// Path to the source CSV (overrides config file; loader binaries only)
    #[arg(long)]
    pub csv: Option<String>,

    /// Log level (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_mongo")]
    pub mongo: MongoConfig,

    #[serde(default = "default_postgres")]
    pub postgres: PostgresConfig,

    #[serde(default = "default_sources")]
    pub sources: SourcesConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MongoConfig {
    #[serde(default = "default_mongo_uri")]
    pub uri: String,

    #[serde(default = "default_mongo_database")]
    pub database: String,

    #[serde(default = "default_mongo_collection")]
    pub collection: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostgresConfig {
    #[serde(default = "default_pg_host")]
    pub host: String,

    #[serde(default = "default_pg_port")]
    pub port: u16,

    #[serde(default = "default_pg_dbname")]
    pub dbname: String,

    #[serde(default = "default_pg_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    #[serde(default = "default_transactions_csv")]
    pub transactions_csv: String,

    #[serde(default = "default_identities_csv")]
    pub identities_csv: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

fn default_mongo() -> MongoConfig {
    MongoConfig {
        uri: default_mongo_uri(),
        database: default_mongo_database(),
        collection: default_mongo_collection(),
    }
}

fn default_postgres() -> PostgresConfig {
    PostgresConfig {
        host: default_pg_host(),
        port: default_pg_port(),
        dbname: default_pg_dbname(),
        user: default_pg_user(),
        password: String::new(),
    }
}

fn default_sources() -> SourcesConfig {
    SourcesConfig {
        transactions_csv: default_transactions_csv(),
        identities_csv: default_identities_csv(),
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        json: false,
    }
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_mongo_database() -> String {
    "transactionsdb".to_string()
}

fn default_mongo_collection() -> String {
    "transactions_data".to_string()
}

fn default_pg_host() -> String {
    "localhost".to_string()
}

fn default_pg_port() -> u16 {
    5432
}

fn default_pg_dbname() -> String {
    "personinfodb".to_string()
}

fn default_pg_user() -> String {
    "postgres".to_string()
}

fn default_transactions_csv() -> String {
    "data/fake_transactions_data.csv".to_string()
}

fn default_identities_csv() -> String {
    "data/fake_iban_names_data.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mongo: default_mongo(),
            postgres: default_postgres(),
            sources: default_sources(),
            logging: default_logging(),
        }
    }
}

impl Config {
    pub fn load(cli: &CliArgs) -> Self {
        let mut config = match std::fs::read_to_string(&cli.config) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Config::default()
            }),
            Err(_) => Config::default(),
        };

        // CLI overrides
        if let Some(ref csv) = cli.csv {
            config.sources.transactions_csv = csv.clone();
            config.sources.identities_csv = csv.clone();
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }

        // Environment override for the one secret
        if config.postgres.password.is_empty() {
            if let Ok(password) = std::env::var(PG_PASSWORD_ENV) {
                config.postgres.password = password;
            }
        }

        config
    }
}

impl PostgresConfig {
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            self.host, self.port, self.dbname, self.user, self.password
        )
    }
}
