//! Validation error types

use std::fmt;

use crate::error::ErrorKind;

/// Validation error for request input, raised before any store access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field must parse as an integer
    NotNumber { field: &'static str },

    /// Pagination value below zero
    Negative,

    /// Tri-state flag got something other than true/false/empty
    InvalidFlag { field: &'static str },

    /// Required string fields are empty
    Empty { fields: &'static str },

    /// Required JSON field is absent
    Missing { field: &'static str },

    /// Body or query string could not be decoded
    Malformed { reason: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::BadRequest
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNumber { field } => write!(f, "{} must be number", field),
            Self::Negative => f.write_str("offset or limit cannot be negative"),
            Self::InvalidFlag { field } => write!(f, "{} must be true or false", field),
            Self::Empty { fields } => write!(f, "{} values must be not empty", fields),
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Malformed { reason } => write!(f, "malformed request: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
