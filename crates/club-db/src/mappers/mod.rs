//! Model to entity mappers
//!
//! - `From<Model> for Entity` where every column maps infallibly
//! - `TryFrom<Model> for Entity` where a text column carries an enumeration;
//!   an unknown stored value surfaces as a `DatabaseError`

mod club;
mod invite;
mod member;
mod role;
mod user;

use club_core::DomainError;

pub(crate) fn parse_column<T>(column: &str, raw: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| DomainError::DatabaseError(format!("corrupt {column} column: {e}")))
}

/// Convert a batch of rows, failing on the first unmappable one
pub(crate) fn try_collect<M, E>(rows: Vec<M>) -> Result<Vec<E>, DomainError>
where
    E: TryFrom<M, Error = DomainError>,
{
    rows.into_iter().map(E::try_from).collect()
}
