//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod song;
pub mod filter;
pub mod release_date;
pub mod pagination;

pub use validation::ValidationError;
pub use song::{NewSong, Song, SongPatch};
pub use filter::{LinkPresence, SongFilter};
pub use release_date::{format_date, parse_date, year_bounds, DateForm};
pub use pagination::{Pagination, PaginationParams};
