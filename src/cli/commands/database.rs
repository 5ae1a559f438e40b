use crate::db::{DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_CONNECTIONS, DatabaseConfig};
use anyhow::{Context, Result, bail};
use clap::{Arg, ArgMatches, Command};

pub const ARG_DSN: &str = "dsn";
pub const ARG_DB_MAX_CONNECTIONS: &str = "db-max-connections";
pub const ARG_DB_MIN_CONNECTIONS: &str = "db-min-connections";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .long_help(
                    "Database connection string. TLS is mandatory: sslmode values weaker than `require` are raised to `require`.",
                )
                .env("POSTGRES_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DB_MAX_CONNECTIONS)
                .long(ARG_DB_MAX_CONNECTIONS)
                .help("Maximum pooled database connections")
                .default_value("5")
                .env("DASHBOARD_DB_MAX_CONNECTIONS")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_DB_MIN_CONNECTIONS)
                .long(ARG_DB_MIN_CONNECTIONS)
                .help("Minimum idle database connections")
                .default_value("1")
                .env("DASHBOARD_DB_MIN_CONNECTIONS")
                .value_parser(clap::value_parser!(u32)),
        )
}

/// Build the database configuration from CLI matches.
///
/// # Errors
/// Returns an error if the DSN is missing or the pool bounds are inconsistent.
pub fn config(matches: &ArgMatches) -> Result<DatabaseConfig> {
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;
    let max = matches
        .get_one::<u32>(ARG_DB_MAX_CONNECTIONS)
        .copied()
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);
    let min = matches
        .get_one::<u32>(ARG_DB_MIN_CONNECTIONS)
        .copied()
        .unwrap_or(DEFAULT_MIN_CONNECTIONS);

    if min > max {
        bail!("--{ARG_DB_MIN_CONNECTIONS} ({min}) must not exceed --{ARG_DB_MAX_CONNECTIONS} ({max})");
    }

    Ok(DatabaseConfig::new(dsn)
        .with_max_connections(max)
        .with_min_connections(min))
}
