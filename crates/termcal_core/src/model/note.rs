//! Note date key and note record.
//!
//! # Responsibility
//! - Parse user-supplied `YYYY-MM-DD` strings into validated calendar days.
//! - Provide the canonical key form persisted by the note store.
//!
//! # Invariants
//! - Only strict four-digit-year, two-digit-month, two-digit-day input is
//!   accepted; `2025-3-1` is rejected even though it names a real day.
//! - Lexicographic order of `NoteDate::key()` equals chronological order for
//!   years 0000..=9999, so sorted maps keyed by it iterate by date.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso date regex"));

/// Date parsing failure for note keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Input does not have the `YYYY-MM-DD` shape.
    InvalidFormat(String),
    /// Input has the right shape but names no real calendar day.
    OutOfRange(String),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(value) => {
                write!(f, "invalid date format `{value}`; use YYYY-MM-DD")
            }
            Self::OutOfRange(value) => write!(f, "`{value}` is not a valid calendar date"),
        }
    }
}

impl Error for DateParseError {}

/// Calendar day used as the note store key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteDate(NaiveDate);

impl NoteDate {
    /// Parses strict `YYYY-MM-DD` text.
    ///
    /// # Errors
    /// - `InvalidFormat` when the shape does not match.
    /// - `OutOfRange` when month/day do not form a real date (`2025-13-01`,
    ///   `2023-02-29`).
    pub fn parse(value: &str) -> Result<Self, DateParseError> {
        let caps = ISO_DATE_RE
            .captures(value)
            .ok_or_else(|| DateParseError::InvalidFormat(value.to_string()))?;

        // Shape is guaranteed by the regex, so these parses only fail on overflow.
        let year = caps[1]
            .parse::<i32>()
            .map_err(|_| DateParseError::InvalidFormat(value.to_string()))?;
        let month = caps[2]
            .parse::<u32>()
            .map_err(|_| DateParseError::InvalidFormat(value.to_string()))?;
        let day = caps[3]
            .parse::<u32>()
            .map_err(|_| DateParseError::InvalidFormat(value.to_string()))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DateParseError::OutOfRange(value.to_string()))
    }

    /// Wraps an existing chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped chrono date.
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Canonical `YYYY-MM-DD` storage key.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl Display for NoteDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for NoteDate {
    type Err = DateParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// One dated note as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub date: NoteDate,
    pub text: String,
}

impl Note {
    pub fn new(date: NoteDate, text: impl Into<String>) -> Self {
        Self {
            date,
            text: text.into(),
        }
    }
}
