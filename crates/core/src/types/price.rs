//! Decimal price and rating values.
//!
//! The remote API sends both as JSON numbers; form input arrives as text.
//! Both are held as [`Decimal`] so display never shows float noise.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] or [`Rating`] from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("'{0}' is not a number")]
    NotANumber(String),
    /// The value is below zero.
    #[error("value cannot be negative")]
    Negative,
}

fn parse_non_negative(s: &str) -> Result<Decimal, PriceError> {
    let value =
        Decimal::from_str(s.trim()).map_err(|_| PriceError::NotANumber(s.trim().to_owned()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PriceError::Negative);
    }
    Ok(value)
}

/// A product price in the store's single currency.
///
/// ```
/// use catalog_cart_core::Price;
///
/// let price = Price::parse("19.9").unwrap();
/// assert_eq!(price.to_string(), "$19.90");
/// assert!(Price::parse("free").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a price typed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        parse_non_negative(s).map(Self)
    }

    /// The amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A product rating as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Rating(Decimal);

impl Rating {
    /// Create a new rating.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parse a rating typed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        parse_non_negative(s).map(Self)
    }

    /// The underlying value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Rating {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
