//! songlib CLI - song catalog service
//!
//! - `serve`: run the HTTP API (applies migrations on startup)
//! - `migrate`: apply pending database migrations and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "songlib",
    author,
    version,
    about = "Song catalog HTTP service backed by Postgres",
    long_about = "List, page through, add, update and delete songs. New songs are enriched \
                  with release date, lyrics and link from an external song info service."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Apply pending database migrations
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Env files must be loaded before clap reads `env = ...` fallbacks
    let env_files = config::load_dotenv()?;
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    for path in &env_files {
        tracing::debug!(path = %path.display(), "loaded env file");
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }
    Ok(())
}
