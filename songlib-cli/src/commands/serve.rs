//! HTTP server command
//!
//! Connects to Postgres, applies migrations, and serves the song catalog API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use songlib_server::db::{create_pool_with_options, run_migrations, SongRepo};
use songlib_server::{run_server, AppState, HttpSongInfo, ServerConfig};

use crate::config::resolve_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SONGLIB_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Port to listen on (overrides the port of --bind)
    #[arg(long, short = 'p', env = "HTTP_PORT")]
    pub port: Option<u16>,

    /// Database URL (falls back to DB_HOST/DB_NAME/DB_USERNAME/DB_PASSWORD)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Base URL of the song info service used to enrich new songs
    #[arg(long, env = "HTTP_EXTERNALAPI")]
    pub external_api: String,

    /// Maximum connections in the database pool
    #[arg(long, env = "SONGLIB_DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Upper bound for one request in seconds
    #[arg(long, env = "SONGLIB_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Upper bound for one song info lookup in seconds
    #[arg(long, env = "SONGLIB_LOOKUP_TIMEOUT", default_value_t = 10)]
    pub lookup_timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn bind_addr(&self) -> SocketAddr {
        let mut addr = self.bind;
        if let Some(port) = self.port {
            addr.set_port(port);
        }
        addr
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url.clone())?;
    let bind_addr = args.bind_addr();

    tracing::info!(%bind_addr, external_api = %args.external_api, "Starting songlib server");

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let lookup = HttpSongInfo::with_timeout(
        args.external_api.as_str(),
        Duration::from_secs(args.lookup_timeout),
    )
    .context("Failed to build song info client")?;

    let state = AppState::new(Arc::new(SongRepo::new(pool)), Arc::new(lookup));

    let config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout),
    };

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
