//! Error taxonomy for songlib-server
//!
//! Every error type in the crate classifies itself into one [`ErrorKind`].
//! Callers branch on the kind, never on message text.

use axum::http::StatusCode;

/// Named failure conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or negative numeric input, invalid tri-state flag, empty field
    BadRequest,
    /// Unparsable year or `dd.mm.yyyy` date
    BadDate,
    /// Update request carried none of release date, text, link
    NoUpdateFields,
    /// Update/delete target does not exist
    BadId,
    /// (song, group) pair already stored
    DuplicateSong,
    /// Read by id found nothing
    NotFound,
    /// Enrichment call failed or answered with a non-success status
    UpstreamUnavailable,
    /// Storage or serialization failure not otherwise classified
    Internal,
}

impl ErrorKind {
    /// HTTP status this kind is reported with.
    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest
            | Self::BadDate
            | Self::NoUpdateFields
            | Self::BadId
            | Self::DuplicateSong
            | Self::NotFound => StatusCode::BAD_REQUEST,
            Self::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the client gets a JSON error body. 5xx answers are bare.
    pub fn has_body(self) -> bool {
        self.status().is_client_error()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::BadDate => "bad_date",
            Self::NoUpdateFields => "no_update_fields",
            Self::BadId => "bad_id",
            Self::DuplicateSong => "duplicate_song",
            Self::NotFound => "not_found",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
