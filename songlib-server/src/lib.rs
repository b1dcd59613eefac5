//! songlib-server: HTTP service for a song catalog
//!
//! Filtered listing, verse-paged lyrics, and creation enriched from an
//! external song info service, backed by one Postgres table.

pub mod db;
pub mod error;
pub mod http;
pub mod lookup;
pub mod models;
pub mod verses;

pub use error::ErrorKind;
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use lookup::{HttpSongInfo, SongDetail, SongInfoSource};
