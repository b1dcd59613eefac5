//! Environment loading for the songlib binary
//!
//! Priority (highest first):
//! 1. Variables already set in the process environment
//! 2. `.env` in the current directory
//! 3. `config/app.env`
//!
//! dotenvy never overwrites a variable that is already set, so loading
//! order alone gives the priority above.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File holding deployment settings next to the binary's working directory
pub const APP_ENV_FILE: &str = "config/app.env";

/// Load `.env` and `config/app.env` into the process environment.
///
/// Runs before the subscriber exists (clap reads the env fallbacks), so
/// the loaded files are returned for the caller to log. Missing files are
/// not an error.
pub fn load_dotenv() -> Result<Vec<PathBuf>> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    let app_env = Path::new(APP_ENV_FILE);
    if app_env.exists() {
        dotenvy::from_path(app_env)
            .with_context(|| format!("Failed to read {}", app_env.display()))?;
        loaded.push(app_env.to_path_buf());
    }

    Ok(loaded)
}

/// Assemble a Postgres DSN from its parts.
pub fn database_url_from_parts(host: &str, name: &str, user: &str, password: &str) -> String {
    format!("postgres://{user}:{password}@{host}/{name}?sslmode=disable")
}

/// Resolve the database URL: explicit value first, then `DB_HOST`,
/// `DB_NAME`, `DB_USERNAME` and `DB_PASSWORD` from the environment.
pub fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    if let Some(url) = explicit.filter(|u| !u.is_empty()) {
        return Ok(url);
    }

    let var = |key: &str| {
        std::env::var(key).with_context(|| {
            format!("{key} not set. Set --database-url, DATABASE_URL, or DB_HOST/DB_NAME/DB_USERNAME/DB_PASSWORD")
        })
    };

    Ok(database_url_from_parts(
        &var("DB_HOST")?,
        &var("DB_NAME")?,
        &var("DB_USERNAME")?,
        &var("DB_PASSWORD")?,
    ))
}
