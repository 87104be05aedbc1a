// crates/bookstore-core/src/core/time.rs
// ============================================================================
// Module: Bookstore Sale Dates
// Description: UTC sale timestamps with microsecond precision.
// Purpose: Parse fixture dates and keep report ordering chronological.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! [`SaleDate`] accepts the date shapes found in fixtures:
//! - RFC 3339 date-times (`2018-10-25T09:45:24.552Z`)
//! - naive date-times, read as UTC (`2018-10-25 09:45:24` or with a `T`)
//! - date-only values, read as midnight UTC (`2023-01-01`)
//!
//! Values are truncated to whole microseconds so the stored integer form
//! round-trips exactly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use ::time::Date;
use ::time::OffsetDateTime;
use ::time::PrimitiveDateTime;
use ::time::Time;
use ::time::UtcOffset;
use ::time::format_description::BorrowedFormatItem;
use ::time::format_description::well_known::Rfc3339;
use ::time::macros::format_description;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Date-only form.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Naive date-time with a space separator.
const NAIVE_SPACE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
);
/// Naive date-time with a `T` separator.
const NAIVE_T_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);
/// Display form for whole seconds.
const DISPLAY_SECONDS_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
/// Display form with microseconds.
const DISPLAY_MICROS_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// Nanoseconds per microsecond.
const NANOS_PER_MICRO: i128 = 1_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Sale date parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleDateError {
    /// Text matches none of the accepted date shapes.
    #[error("invalid sale date `{0}`")]
    Invalid(String),
    /// Timestamp falls outside the supported range.
    #[error("sale date out of range: {0}")]
    OutOfRange(String),
}

// ============================================================================
// SECTION: Sale Date
// ============================================================================

/// UTC sale timestamp.
///
/// # Invariants
/// - `micros` equals `instant` expressed as unix microseconds.
/// - `instant` is in UTC and has no sub-microsecond component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SaleDate {
    /// Unix microseconds, compared first.
    micros: i64,
    /// Equivalent UTC instant.
    instant: OffsetDateTime,
}

impl SaleDate {
    /// Parses a sale date from fixture text.
    ///
    /// # Errors
    ///
    /// Returns [`SaleDateError`] when the text matches no accepted shape.
    pub fn parse(value: &str) -> Result<Self, SaleDateError> {
        let trimmed = value.trim();
        let instant = OffsetDateTime::parse(trimmed, &Rfc3339)
            .or_else(|_| {
                PrimitiveDateTime::parse(trimmed, NAIVE_SPACE_FORMAT).map(PrimitiveDateTime::assume_utc)
            })
            .or_else(|_| {
                PrimitiveDateTime::parse(trimmed, NAIVE_T_FORMAT).map(PrimitiveDateTime::assume_utc)
            })
            .or_else(|_| {
                Date::parse(trimmed, DATE_FORMAT).map(|date| date.midnight().assume_utc())
            })
            .map_err(|_| SaleDateError::Invalid(trimmed.to_string()))?;
        Self::from_instant(instant)
    }

    /// Builds a sale date from a UTC instant, truncating to microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`SaleDateError::OutOfRange`] when the instant cannot be represented.
    pub fn from_instant(instant: OffsetDateTime) -> Result<Self, SaleDateError> {
        let nanos = instant.unix_timestamp_nanos();
        let micros = i64::try_from(nanos.div_euclid(NANOS_PER_MICRO))
            .map_err(|_| SaleDateError::OutOfRange(nanos.to_string()))?;
        Self::from_unix_micros(micros)
    }

    /// Rebuilds a sale date from stored unix microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`SaleDateError::OutOfRange`] when the value is outside the calendar range.
    pub fn from_unix_micros(micros: i64) -> Result<Self, SaleDateError> {
        let instant = OffsetDateTime::from_unix_timestamp_nanos(i128::from(micros) * NANOS_PER_MICRO)
            .map_err(|_| SaleDateError::OutOfRange(micros.to_string()))?
            .to_offset(UtcOffset::UTC);
        Ok(Self {
            micros,
            instant,
        })
    }

    /// Returns the timestamp as unix microseconds.
    #[must_use]
    pub const fn unix_micros(self) -> i64 {
        self.micros
    }
}

impl fmt::Display for SaleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = if self.instant.time() == Time::MIDNIGHT {
            self.instant.format(DATE_FORMAT)
        } else if self.instant.nanosecond() == 0 {
            self.instant.format(DISPLAY_SECONDS_FORMAT)
        } else {
            self.instant.format(DISPLAY_MICROS_FORMAT)
        };
        f.write_str(&rendered.map_err(|_| fmt::Error)?)
    }
}

impl Serialize for SaleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rendered = self.instant.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&rendered)
    }
}

impl<'de> Deserialize<'de> for SaleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use super::*;

    #[test]
    fn date_only_displays_as_date() {
        let date = SaleDate::parse("2023-01-01").unwrap();
        assert_eq!(date.to_string(), "2023-01-01");
        assert_eq!(date.unix_micros(), 1_672_531_200_000_000);
    }

    #[test]
    fn rfc3339_is_normalized_to_utc() {
        let date = SaleDate::parse("2018-10-25T12:45:24.552+03:00").unwrap();
        assert_eq!(date.to_string(), "2018-10-25 09:45:24.552000");
        let zulu = SaleDate::parse("2018-10-25T09:45:24.552Z").unwrap();
        assert_eq!(date, zulu);
    }

    #[test]
    fn naive_date_times_are_read_as_utc() {
        let spaced = SaleDate::parse("2019-03-01 08:00:00").unwrap();
        let tee = SaleDate::parse("2019-03-01T08:00:00").unwrap();
        assert_eq!(spaced, tee);
        assert_eq!(spaced.to_string(), "2019-03-01 08:00:00");
    }

    #[test]
    fn stored_micros_round_trip() {
        let date = SaleDate::parse("2018-10-25T09:45:24.552123789Z").unwrap();
        let restored = SaleDate::from_unix_micros(date.unix_micros()).unwrap();
        assert_eq!(date, restored);
        assert_eq!(restored.to_string(), "2018-10-25 09:45:24.552123");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(SaleDate::parse("yesterday"), Err(SaleDateError::Invalid(_))));
    }
}
