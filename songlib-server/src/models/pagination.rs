//! Limit/offset pagination parsed from query strings

use super::ValidationError;

/// Pagination parameters
///
/// `limit == 0` means unbounded, `offset == 0` means start at the first item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Parse raw `limit`/`offset` query values.
    ///
    /// Absent or empty values default to 0. Non-numeric input is rejected
    /// per field; negative input is rejected once both fields are numeric.
    pub fn from_raw(limit: Option<&str>, offset: Option<&str>) -> Result<Self, ValidationError> {
        let limit = parse_number(limit, "limit")?;
        let offset = parse_number(offset, "offset")?;

        if limit < 0 || offset < 0 {
            return Err(ValidationError::Negative);
        }

        Ok(Self {
            limit: clamp_u32(limit),
            offset: clamp_u32(offset),
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.limit == 0
    }
}

fn parse_number(raw: Option<&str>, field: &'static str) -> Result<i64, ValidationError> {
    match raw {
        None => Ok(0),
        Some(s) if s.is_empty() => Ok(0),
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| ValidationError::NotNumber { field }),
    }
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl TryFrom<&PaginationParams> for Pagination {
    type Error = ValidationError;

    fn try_from(params: &PaginationParams) -> Result<Self, Self::Error> {
        Self::from_raw(params.limit.as_deref(), params.offset.as_deref())
    }
}
