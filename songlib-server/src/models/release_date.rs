//! Release date parsing at the HTTP boundary
//!
//! Dates travel as `dd.mm.yyyy` text; year filters as a bare `yyyy`.

use chrono::NaiveDate;

/// Wire format for release dates
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Which textual form failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateForm {
    Year,
    DayMonthYear,
}

impl DateForm {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::DayMonthYear => "day.month.year",
        }
    }
}

/// Parse a `dd.mm.yyyy` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields; keep the two/two/four layout strict
    let mut parts = s.split('.');
    let shape_ok = matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some(d), Some(m), Some(y), None) if d.len() == 2 && m.len() == 2 && y.len() == 4
    );
    if !shape_ok || !s.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Render a stored date in wire format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Expand a four-digit year into its inclusive `[Jan 1, Dec 31]` range.
pub fn year_bounds(year: &str) -> Option<(NaiveDate, NaiveDate)> {
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let y: i32 = year.parse().ok()?;
    let start = NaiveDate::from_ymd_opt(y, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(y, 12, 31)?;
    Some((start, end))
}
