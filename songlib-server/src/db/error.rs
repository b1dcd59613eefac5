//! Storage error type

use crate::error::ErrorKind;
use crate::models::DateForm;

/// What a write against a missing id was trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Update,
    Delete,
}

impl WriteAction {
    fn past_tense(self) -> &'static str {
        match self {
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("bad date, date must have format {}", .0.describe())]
    BadDate(DateForm),

    #[error("no data to update, release date or link or text must be not empty")]
    NoUpdateFields,

    #[error("bad id, nothing {}", .action.past_tense())]
    BadId { id: i32, action: WriteAction },

    #[error("song of this group is already added")]
    DuplicateSong { name: String, group: String },

    #[error("no song with this id")]
    NotFound { id: i32 },
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Sqlx(_) => ErrorKind::Internal,
            Self::BadDate(_) => ErrorKind::BadDate,
            Self::NoUpdateFields => ErrorKind::NoUpdateFields,
            Self::BadId { .. } => ErrorKind::BadId,
            Self::DuplicateSong { .. } => ErrorKind::DuplicateSong,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}
