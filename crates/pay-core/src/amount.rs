//! # XRP Amounts
//!
//! Exact XRP amounts and their conversion to drops, the ledger's base unit.
//! Amounts arrive either as JSON numbers or numeric strings and are parsed
//! into a `Decimal` so no floating-point rounding leaks into the drop count.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Drops in one XRP
pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Total XRP supply; no valid payment can exceed it
pub const MAX_XRP: u64 = 100_000_000_000;

/// One drop is 0.000001 XRP
pub const MAX_DECIMAL_PLACES: u32 = 6;

/// Reasons an amount is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is not a number")]
    InvalidFormat,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount has more than 6 decimal places")]
    TooPrecise,
    #[error("amount exceeds the total XRP supply")]
    OutOfRange,
}

/// A validated, positive XRP amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrpAmount(Decimal);

impl XrpAmount {
    /// Parse from a JSON number.
    pub fn from_number(number: &serde_json::Number) -> Result<Self, AmountError> {
        if let Some(value) = number.as_u64() {
            return Self::from_decimal(Decimal::from(value));
        }
        if let Some(value) = number.as_i64() {
            return Self::from_decimal(Decimal::from(value));
        }
        // Floats go through their shortest textual form ("0.1", "1e-7")
        // rather than the binary value.
        parse_decimal(&number.to_string()).and_then(Self::from_decimal)
    }

    /// Validate an already-parsed decimal.
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        let value = value.normalize();
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive);
        }
        if value.scale() > MAX_DECIMAL_PLACES {
            return Err(AmountError::TooPrecise);
        }
        if value > Decimal::from(MAX_XRP) {
            return Err(AmountError::OutOfRange);
        }
        Ok(Self(value))
    }

    /// Convert to drops.
    pub fn to_drops(&self) -> u64 {
        // Scale <= 6 and value <= MAX_XRP, so the product is a whole number
        // well inside u64.
        (self.0 * Decimal::from(DROPS_PER_XRP))
            .trunc()
            .to_u64()
            .unwrap_or_default()
    }

    /// Drops rendered the way the ledger expects native amounts: an integer string.
    pub fn drops_string(&self) -> String {
        self.to_drops().to_string()
    }
}

impl FromStr for XrpAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s.trim()).and_then(Self::from_decimal)
    }
}

impl fmt::Display for XrpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} XRP", self.0)
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, AmountError> {
    if s.is_empty() {
        return Err(AmountError::InvalidFormat);
    }
    if s.contains(['e', 'E']) {
        Decimal::from_scientific(s).map_err(|_| AmountError::InvalidFormat)
    } else {
        Decimal::from_str(s).map_err(|_| AmountError::InvalidFormat)
    }
}
