//! Apply pending schema migrations and exit

use anyhow::{Context, Result};
use clap::Parser;

use songlib_server::db::{create_pool, run_migrations};

use crate::config::resolve_database_url;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (falls back to DB_HOST/DB_NAME/DB_USERNAME/DB_PASSWORD)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    pool.close().await;
    Ok(())
}
