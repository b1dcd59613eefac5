//! Listing filters

use super::song::non_empty;
use super::ValidationError;

/// Tri-state link filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPresence {
    /// No filter
    #[default]
    Any,
    /// Only songs with a link
    Present,
    /// Only songs without a link
    Absent,
}

impl LinkPresence {
    /// Parse the raw `link` query value.
    ///
    /// Accepts exactly `"true"`, `"false"`, or empty/absent.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            None | Some("") => Ok(Self::Any),
            Some("true") => Ok(Self::Present),
            Some("false") => Ok(Self::Absent),
            Some(_) => Err(ValidationError::InvalidFlag { field: "link" }),
        }
    }
}

/// Optional filters for the song listing, AND-combined.
///
/// `year` stays raw text here; the query builder owns year parsing so an
/// unparsable year surfaces as a date error rather than a validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub song: Option<String>,
    pub group: Option<String>,
    pub year: Option<String>,
    pub text: Option<String>,
    pub link: LinkPresence,
}

impl SongFilter {
    pub fn builder() -> SongFilterBuilder {
        SongFilterBuilder::default()
    }
}

/// Builder that normalizes empty strings to absent filters
#[derive(Debug, Default)]
pub struct SongFilterBuilder {
    filter: SongFilter,
}

impl SongFilterBuilder {
    pub fn song(mut self, fragment: impl Into<Option<String>>) -> Self {
        self.filter.song = non_empty(fragment.into());
        self
    }

    pub fn group(mut self, fragment: impl Into<Option<String>>) -> Self {
        self.filter.group = non_empty(fragment.into());
        self
    }

    pub fn year(mut self, year: impl Into<Option<String>>) -> Self {
        self.filter.year = non_empty(year.into());
        self
    }

    pub fn text(mut self, fragment: impl Into<Option<String>>) -> Self {
        self.filter.text = non_empty(fragment.into());
        self
    }

    pub fn link(mut self, link: LinkPresence) -> Self {
        self.filter.link = link;
        self
    }

    pub fn build(self) -> SongFilter {
        self.filter
    }
}
