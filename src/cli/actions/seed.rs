use crate::{
    db::{self, DatabaseConfig},
    seed::{self, SeedOptions},
};
use anyhow::{Context, Result};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub database: DatabaseConfig,
    pub seed: SeedOptions,
}

/// Run one seeding transaction and print the per-table report.
/// # Errors
/// Returns an error if the database is unreachable or seeding fails.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Seed args: {:?}", args);

    let pool = db::connect(&args.database).await?;

    let result = seed::run(&pool, &args.seed).await;

    db::close(&pool).await;

    let report = result.context("Seeding failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
