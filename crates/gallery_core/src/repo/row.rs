//! Flat result rows and typed column decoding.
//!
//! # Responsibility
//! - Capture one SQLite result row as `(alias, optional text)` pairs.
//! - Apply present columns to typed targets through [`DecodeColumns`].
//!
//! # Invariants
//! - NULL columns are absent and never reach a target; they are not zero and
//!   not an empty string.
//! - Numeric columns parse strictly; malformed text is a [`DecodeError`],
//!   never a silent default.
//! - Targets ignore aliases they do not own, so one row can feed several
//!   targets.

use crate::model::album::Album;
use crate::model::picture::Picture;
use crate::model::user::User;
use crate::query::alias;
use crate::repo::RepoResult;
use rusqlite::types::ValueRef;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DecodeResult<T> = Result<T, DecodeError>;

/// A result column could not be read as its expected type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    InvalidInteger { column: String, value: String },
    InvalidFloat { column: String, value: String },
    InvalidUtf8 { column: String },
    UnsupportedBlob { column: String },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInteger { column, value } => {
                write!(f, "column `{column}` holds `{value}`, expected an integer")
            }
            Self::InvalidFloat { column, value } => {
                write!(f, "column `{column}` holds `{value}`, expected a number")
            }
            Self::InvalidUtf8 { column } => write!(f, "column `{column}` is not valid UTF-8"),
            Self::UnsupportedBlob { column } => {
                write!(f, "column `{column}` holds a blob, expected text or a number")
            }
        }
    }
}

impl Error for DecodeError {}

/// One flat result row keyed by column alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    columns: Vec<(String, Option<String>)>,
}

impl RawRow {
    pub fn new(columns: Vec<(String, Option<String>)>) -> Self {
        Self { columns }
    }

    /// Builds a row from borrowed pairs; handy when rows come from fixtures.
    pub fn from_pairs(pairs: &[(&str, Option<&str>)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.map(str::to_string)))
                .collect(),
        )
    }

    /// Captures a SQLite row using the statement's column names as aliases.
    pub fn from_sqlite(row: &rusqlite::Row<'_>, column_names: &[String]) -> RepoResult<Self> {
        let mut columns = Vec::with_capacity(column_names.len());
        for (index, name) in column_names.iter().enumerate() {
            let value = raw_text(name, row.get_ref(index)?)?;
            columns.push((name.clone(), value));
        }
        Ok(Self { columns })
    }

    /// Returns the raw text for `column`, or `None` when absent or NULL.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Iterates present (non-NULL) columns in select order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|value| (name.as_str(), value)))
    }
}

fn raw_text(column: &str, value: ValueRef<'_>) -> DecodeResult<Option<String>> {
    match value {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(number) => Ok(Some(number.to_string())),
        ValueRef::Real(number) => Ok(Some(number.to_string())),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| Some(text.to_string()))
            .map_err(|_| DecodeError::InvalidUtf8 {
                column: column.to_string(),
            }),
        ValueRef::Blob(_) => Err(DecodeError::UnsupportedBlob {
            column: column.to_string(),
        }),
    }
}

/// A typed object that can absorb columns of a flat row.
pub trait DecodeColumns {
    /// Applies one present column. Unknown aliases must be ignored.
    fn decode_column(&mut self, column: &str, value: &str) -> DecodeResult<()>;
}

/// Feeds every present column of `row` into `target`.
pub fn decode_row<T: DecodeColumns + ?Sized>(row: &RawRow, target: &mut T) -> DecodeResult<()> {
    for (column, value) in row.present() {
        target.decode_column(column, value)?;
    }
    Ok(())
}

/// Parses an integer column. No trimming, no fallback.
pub fn parse_integer(column: &str, value: &str) -> DecodeResult<i64> {
    value.parse::<i64>().map_err(|_| DecodeError::InvalidInteger {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Parses a finite floating-point column.
pub fn parse_float(column: &str, value: &str) -> DecodeResult<f64> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(DecodeError::InvalidFloat {
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

impl DecodeColumns for User {
    fn decode_column(&mut self, column: &str, value: &str) -> DecodeResult<()> {
        match column {
            alias::USER_ID => self.id = parse_integer(column, value)?,
            alias::USER_NAME => self.name = value.to_string(),
            _ => {}
        }
        Ok(())
    }
}

impl DecodeColumns for Album {
    fn decode_column(&mut self, column: &str, value: &str) -> DecodeResult<()> {
        match column {
            alias::ALBUM_ID => self.id = parse_integer(column, value)?,
            alias::ALBUM_NAME => self.name = value.to_string(),
            alias::ALBUM_CREATION_DATE => self.creation_date = value.to_string(),
            alias::ALBUM_USER_ID => self.user_id = parse_integer(column, value)?,
            _ => {}
        }
        Ok(())
    }
}

impl DecodeColumns for Picture {
    fn decode_column(&mut self, column: &str, value: &str) -> DecodeResult<()> {
        match column {
            alias::PICTURE_ID => self.id = parse_integer(column, value)?,
            alias::PICTURE_NAME => self.name = value.to_string(),
            alias::PICTURE_LOCATION => self.location = value.to_string(),
            alias::PICTURE_CREATION_DATE => self.creation_date = value.to_string(),
            alias::PICTURE_ALBUM_ID => self.album_id = parse_integer(column, value)?,
            alias::TAG_USER_ID => {
                self.tag_user(parse_integer(column, value)?);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Single `count` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountCell(pub Option<i64>);

impl DecodeColumns for CountCell {
    fn decode_column(&mut self, column: &str, value: &str) -> DecodeResult<()> {
        if column == alias::COUNT {
            self.0 = Some(parse_integer(column, value)?);
        }
        Ok(())
    }
}

/// Single `average` column; stays `None` when the aggregate was NULL.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AverageCell(pub Option<f64>);

impl DecodeColumns for AverageCell {
    fn decode_column(&mut self, column: &str, value: &str) -> DecodeResult<()> {
        if column == alias::AVERAGE {
            self.0 = Some(parse_float(column, value)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_row, parse_float, parse_integer, AverageCell, DecodeError, RawRow};
    use crate::model::picture::Picture;
    use crate::model::user::User;

    #[test]
    fn null_columns_are_skipped_not_zeroed() {
        let row = RawRow::from_pairs(&[
            ("picture_id", Some("3")),
            ("picture_name", Some("beach")),
            ("tag_user_id", None),
        ]);
        let mut picture = Picture::default();
        decode_row(&row, &mut picture).unwrap();

        assert_eq!(picture.id, 3);
        assert_eq!(picture.name, "beach");
        assert!(picture.tags.is_empty());
    }

    #[test]
    fn malformed_integer_is_a_decode_error() {
        let row = RawRow::from_pairs(&[("user_id", Some("12abc")), ("user_name", Some("dana"))]);
        let err = decode_row(&row, &mut User::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidInteger {
                column: "user_id".to_string(),
                value: "12abc".to_string(),
            }
        );
    }

    #[test]
    fn strict_parsers_reject_padding_and_non_finite_values() {
        assert!(parse_integer("count", " 4").is_err());
        assert!(parse_integer("count", "").is_err());
        assert!(parse_float("average", "NaN").is_err());
        assert_eq!(parse_float("average", "2.5").unwrap(), 2.5);
    }

    #[test]
    fn targets_ignore_columns_they_do_not_own() {
        let row = RawRow::from_pairs(&[
            ("album_name", Some("Summer")),
            ("user_id", Some("9")),
            ("average", None),
        ]);
        let mut user = User::default();
        decode_row(&row, &mut user).unwrap();
        assert_eq!(user.id, 9);
        assert!(user.name.is_empty());

        let mut average = AverageCell::default();
        decode_row(&row, &mut average).unwrap();
        assert_eq!(average.0, None);
    }
}
