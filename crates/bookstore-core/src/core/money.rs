// crates/bookstore-core/src/core/money.rs
// ============================================================================
// Module: Bookstore Prices
// Description: Decimal sale prices with exact text round-trips.
// Purpose: Avoid binary floating point for money values.
// Dependencies: bigdecimal, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`Price`] wraps a [`BigDecimal`] and keeps the scale it was written with, so
//! `9.99` is stored and printed as `9.99` and `16.0` as `16.0`. Prices always
//! print in plain notation, never with an exponent.
//!
//! JSON integers convert exactly. Other JSON numbers arrive as `f64` and are
//! converted through their shortest rendered text, so a float carrying more
//! than [`MAX_FLOAT_DIGITS`] significant digits is rejected instead of being
//! silently rounded. Prices that need more precision must be written as
//! strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Number;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Significant digits an `f64` JSON number can carry without rounding.
pub const MAX_FLOAT_DIGITS: usize = 15;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Price parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Value is not a decimal number.
    #[error("invalid price `{0}`")]
    Invalid(String),
    /// Value is below zero.
    #[error("price must not be negative: {0}")]
    Negative(String),
    /// JSON float too long to convert without rounding.
    #[error("price `{0}` exceeds 15 significant digits; write it as a string")]
    Imprecise(String),
}

// ============================================================================
// SECTION: Price
// ============================================================================

/// Non-negative decimal sale price.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(BigDecimal);

impl Price {
    /// Parses a price from decimal text.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] when the text is not a decimal or is negative.
    pub fn parse(value: &str) -> Result<Self, PriceError> {
        let trimmed = value.trim();
        let decimal =
            BigDecimal::from_str(trimmed).map_err(|_| PriceError::Invalid(trimmed.to_string()))?;
        Self::from_decimal(decimal)
    }

    /// Converts a JSON number using its rendered text.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Imprecise`] for floats with more than
    /// [`MAX_FLOAT_DIGITS`] significant digits, and [`PriceError`] otherwise
    /// when the number is negative.
    pub fn from_json_number(number: &Number) -> Result<Self, PriceError> {
        let rendered = number.to_string();
        if number.is_f64() && significant_digits(&rendered) > MAX_FLOAT_DIGITS {
            return Err(PriceError::Imprecise(rendered));
        }
        Self::parse(&rendered)
    }

    /// Wraps an existing decimal value.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for values below zero.
    pub fn from_decimal(decimal: BigDecimal) -> Result<Self, PriceError> {
        if decimal < BigDecimal::from(0) {
            return Err(PriceError::Negative(decimal.to_string()));
        }
        Ok(Self(decimal))
    }
}

/// Counts significant digits in a rendered number, ignoring sign and exponent.
fn significant_digits(rendered: &str) -> usize {
    let mantissa = rendered.split(['e', 'E']).next().unwrap_or(rendered);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').trim_end_matches('0').len()
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Wire form accepted for prices: a JSON number or decimal text.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceInput {
    /// JSON number.
    Number(Number),
    /// Decimal text.
    Text(String),
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_plain_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match PriceInput::deserialize(deserializer)? {
            PriceInput::Number(number) => Self::from_json_number(&number),
            PriceInput::Text(text) => Self::parse(&text),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
