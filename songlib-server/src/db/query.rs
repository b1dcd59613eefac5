//! Dynamic SQL for song listing and partial updates
//!
//! Only column names and placeholders are written into the SQL text.
//! Every user-supplied value travels as a bound argument.

use chrono::NaiveDate;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

use super::DbError;
use crate::models::{parse_date, year_bounds, DateForm, LinkPresence, Pagination, SongFilter, SongPatch};

const SELECT_SONGS: &str =
    "SELECT id, song_name, group_name, release_date, text, link FROM songs";

/// A value bound to a `$n` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Text(String),
    Date(NaiveDate),
    Int(i64),
}

/// SQL text plus its positional arguments, `args[0]` bound to `$1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

impl SqlStatement {
    /// Prepare an sqlx query with every argument bound in order.
    pub fn query(&self) -> Query<'_, Postgres, PgArguments> {
        let mut query = sqlx::query(&self.sql);
        for arg in &self.args {
            query = match arg {
                SqlArg::Text(s) => query.bind(s.as_str()),
                SqlArg::Date(d) => query.bind(*d),
                SqlArg::Int(n) => query.bind(*n),
            };
        }
        query
    }
}

/// Collects arguments and hands out matching placeholders
#[derive(Default)]
struct Params {
    args: Vec<SqlArg>,
}

impl Params {
    fn push(&mut self, arg: SqlArg) -> String {
        self.args.push(arg);
        format!("${}", self.args.len())
    }
}

/// Build the filtered, ordered, paginated song listing.
///
/// Fails with `BadDate` when the year filter is not four digits.
pub fn select_songs(filter: &SongFilter, page: Pagination) -> Result<SqlStatement, DbError> {
    let mut params = Params::default();
    let mut conditions: Vec<String> = Vec::new();

    if let Some(fragment) = &filter.song {
        let p = params.push(SqlArg::Text(contains_pattern(fragment)));
        conditions.push(format!("song_name LIKE {}", p));
    }

    if let Some(fragment) = &filter.group {
        let p = params.push(SqlArg::Text(contains_pattern(fragment)));
        conditions.push(format!("group_name LIKE {}", p));
    }

    if let Some(year) = &filter.year {
        let (start, end) = year_bounds(year).ok_or(DbError::BadDate(DateForm::Year))?;
        let start = params.push(SqlArg::Date(start));
        let end = params.push(SqlArg::Date(end));
        conditions.push(format!("release_date >= {} AND release_date <= {}", start, end));
    }

    if let Some(fragment) = &filter.text {
        let p = params.push(SqlArg::Text(contains_pattern(fragment)));
        conditions.push(format!("text LIKE {}", p));
    }

    match filter.link {
        LinkPresence::Any => {}
        LinkPresence::Present => conditions.push("link IS NOT NULL".to_string()),
        LinkPresence::Absent => conditions.push("link IS NULL".to_string()),
    }

    let mut sql = String::from(SELECT_SONGS);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY id");

    if !page.is_unbounded() {
        let p = params.push(SqlArg::Int(i64::from(page.limit)));
        sql.push_str(&format!(" LIMIT {}", p));
    }
    if page.offset > 0 {
        let p = params.push(SqlArg::Int(i64::from(page.offset)));
        sql.push_str(&format!(" OFFSET {}", p));
    }

    Ok(SqlStatement {
        sql,
        args: params.args,
    })
}

/// Build the partial UPDATE for one song.
///
/// Fails with `NoUpdateFields` for an empty patch and `BadDate` when the
/// release date is not `dd.mm.yyyy`. Nothing touches the database here.
pub fn update_song(id: i32, patch: &SongPatch) -> Result<SqlStatement, DbError> {
    if patch.is_empty() {
        return Err(DbError::NoUpdateFields);
    }

    let mut params = Params::default();
    let mut assignments: Vec<String> = Vec::new();

    if let Some(raw) = &patch.release_date {
        let date = parse_date(raw).ok_or(DbError::BadDate(DateForm::DayMonthYear))?;
        let p = params.push(SqlArg::Date(date));
        assignments.push(format!("release_date = {}", p));
    }

    if let Some(text) = &patch.text {
        let p = params.push(SqlArg::Text(text.clone()));
        assignments.push(format!("text = {}", p));
    }

    if let Some(link) = &patch.link {
        let p = params.push(SqlArg::Text(link.clone()));
        assignments.push(format!("link = {}", p));
    }

    let id_placeholder = params.push(SqlArg::Int(i64::from(id)));
    let sql = format!(
        "UPDATE songs SET {} WHERE id = {}",
        assignments.join(", "),
        id_placeholder
    );

    Ok(SqlStatement {
        sql,
        args: params.args,
    })
}

/// `%fragment%` with LIKE metacharacters escaped, so the match is a plain substring.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
