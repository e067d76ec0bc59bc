//! Storage binding for SQLite version columns.
//!
//! A [`Version`] reads and writes as its canonical string form. Reading is
//! strict: an unparsable stored value is an error. Code that wants the
//! forgiving convention — NULL, empty, or garbage all mean "no version" —
//! opts in through [`LenientVersion`].

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::Version;

impl ToSql for Version {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Version {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let bytes = match value {
            ValueRef::Text(text) => text,
            ValueRef::Blob(blob) => blob,
            _ => return Err(FromSqlError::InvalidType),
        };
        let text =
            std::str::from_utf8(bytes).map_err(|error| FromSqlError::Other(Box::new(error)))?;
        Version::parse(text).map_err(|error| FromSqlError::Other(Box::new(error.owned())))
    }
}

/// A version column read with the forgiving "unset" convention.
///
/// NULL, an empty string or blob, and any value that does not parse all read
/// as `None` instead of an error. Callers that need to distinguish "absent"
/// from "corrupt" should read a [`Version`] (or `Option<Version>`) instead,
/// which surfaces the parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LenientVersion(
    /// The stored version, when present and parsable.
    pub Option<Version>,
);

impl FromSql for LenientVersion {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let bytes = match value {
            ValueRef::Null => return Ok(LenientVersion(None)),
            ValueRef::Text(text) => text,
            ValueRef::Blob(blob) => blob,
            _ => return Err(FromSqlError::InvalidType),
        };
        if bytes.is_empty() {
            return Ok(LenientVersion(None));
        }
        let version = std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| Version::parse(text).ok());
        Ok(LenientVersion(version))
    }
}
