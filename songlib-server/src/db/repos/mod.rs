//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Dynamic SQL comes from `db::query`, values always bound
//! - Handles conflicts via the unique constraint (no check-then-insert)
//! - Zero affected rows on a write means the id does not exist

pub mod songs;

pub use songs::{SongRepo, SongRow};
