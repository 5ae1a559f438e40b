use crate::{api, db::DatabaseConfig, seed::SeedOptions};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub database: DatabaseConfig,
    pub seed: SeedOptions,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    api::new(args.port, &args.database, args.seed).await
}
