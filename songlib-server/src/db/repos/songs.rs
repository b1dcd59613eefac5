//! Song repository
//!
//! Every write is a single statement; the unique (song_name, group_name)
//! constraint is relied on rather than checked first.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::db::query::{select_songs, update_song};
use crate::db::{DbError, SongStore, WriteAction};
use crate::models::{format_date, parse_date, DateForm, NewSong, Pagination, Song, SongFilter, SongPatch};

/// Song record from database
#[derive(Debug, Clone, FromRow)]
pub struct SongRow {
    pub id: i32,
    pub song_name: String,
    pub group_name: String,
    pub release_date: Option<NaiveDate>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Self {
            id: row.id,
            name: row.song_name,
            group: row.group_name,
            release_date: row.release_date.map(format_date).unwrap_or_default(),
            text: row.text.unwrap_or_default(),
            link: row.link.unwrap_or_default(),
        }
    }
}

/// Postgres-backed song repository
#[derive(Clone)]
pub struct SongRepo {
    pool: PgPool,
}

impl SongRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongStore for SongRepo {
    async fn list(&self, filter: &SongFilter, page: Pagination) -> Result<Vec<Song>, DbError> {
        let stmt = select_songs(filter, page)?;
        tracing::debug!(sql = %stmt.sql, args = ?stmt.args, "listing songs");

        let rows = stmt.query().fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!(error = %e, sql = %stmt.sql, args = ?stmt.args, "song listing query failed");
            DbError::Sqlx(e)
        })?;

        rows.iter()
            .map(|row| SongRow::from_row(row).map(Song::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                tracing::error!(error = %e, sql = %stmt.sql, "song row decode failed");
                DbError::Sqlx(e)
            })
    }

    async fn text(&self, id: i32) -> Result<String, DbError> {
        let text: Option<Option<String>> =
            sqlx::query_scalar("SELECT text FROM songs WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, id, "song text query failed");
                    DbError::Sqlx(e)
                })?;

        match text {
            Some(text) => Ok(text.unwrap_or_default()),
            None => Err(DbError::NotFound { id }),
        }
    }

    async fn add(&self, song: NewSong) -> Result<i32, DbError> {
        let release_date = if song.release_date.is_empty() {
            None
        } else {
            Some(parse_date(&song.release_date).ok_or(DbError::BadDate(DateForm::DayMonthYear))?)
        };

        let result = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO songs (song_name, group_name, release_date, text, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&song.name)
        .bind(&song.group)
        .bind(release_date)
        .bind(Some(song.text.as_str()).filter(|t| !t.is_empty()))
        .bind(Some(song.link.as_str()).filter(|l| !l.is_empty()))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DbError::DuplicateSong {
                    name: song.name,
                    group: song.group,
                })
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    song = %song.name,
                    group = %song.group,
                    release_date = %song.release_date,
                    link = %song.link,
                    "song insert failed"
                );
                Err(DbError::Sqlx(e))
            }
        }
    }

    async fn update(&self, id: i32, patch: &SongPatch) -> Result<(), DbError> {
        let stmt = update_song(id, patch)?;

        let result = stmt.query().execute(&self.pool).await.map_err(|e| {
            tracing::error!(error = %e, sql = %stmt.sql, args = ?stmt.args, "song update failed");
            DbError::Sqlx(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::BadId {
                id,
                action: WriteAction::Update,
            });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "database ping failed");
                DbError::Sqlx(e)
            })?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id, "song delete failed");
                DbError::Sqlx(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::BadId {
                id,
                action: WriteAction::Delete,
            });
        }
        Ok(())
    }
}
