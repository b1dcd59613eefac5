//! Song records as exposed to clients and as written by the store

use serde::{Deserialize, Serialize};

/// A catalog entry in its wire form.
///
/// NULL columns are rendered as empty strings; the release date is
/// already formatted as `dd.mm.yyyy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i32,
    #[serde(rename = "song")]
    pub name: String,
    pub group: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Fields for a new catalog entry, after enrichment.
///
/// Empty `release_date`, `text` or `link` are stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSong {
    pub name: String,
    pub group: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongPatch {
    /// Build a patch from raw request fields, treating empty strings as absent.
    pub fn from_raw(
        release_date: Option<String>,
        text: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            release_date: non_empty(release_date),
            text: non_empty(text),
            link: non_empty(link),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.release_date.is_none() && self.text.is_none() && self.link.is_none()
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
