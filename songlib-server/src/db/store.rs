//! Storage seam used by the HTTP handlers

use async_trait::async_trait;

use super::DbError;
use crate::models::{NewSong, Pagination, Song, SongFilter, SongPatch};

/// CRUD over the song catalog.
///
/// Handlers only see this trait; `SongRepo` is the Postgres implementation.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Filtered listing ordered by id. No match is an empty vector.
    async fn list(&self, filter: &SongFilter, page: Pagination) -> Result<Vec<Song>, DbError>;

    /// Lyric text of one song, `NotFound` if the id is missing.
    async fn text(&self, id: i32) -> Result<String, DbError>;

    /// Insert and return the generated id.
    async fn add(&self, song: NewSong) -> Result<i32, DbError>;

    /// Apply a partial update.
    async fn update(&self, id: i32, patch: &SongPatch) -> Result<(), DbError>;

    async fn delete(&self, id: i32) -> Result<(), DbError>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
