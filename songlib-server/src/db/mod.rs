//! Database layer - connection pool, query building and repositories
//!
//! # Design Principles
//!
//! - Connection pool via sqlx `PgPool` - no Arc<Mutex<Connection>>
//! - Values are always bound parameters, never spliced into SQL
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Single-statement writes, no multi-step transactions

pub mod error;
pub mod pool;
pub mod query;
pub mod repos;
pub mod store;

pub use error::{DbError, WriteAction};
pub use pool::{create_pool, create_pool_with_options, run_migrations, MIGRATOR};
pub use repos::*;
pub use store::SongStore;
