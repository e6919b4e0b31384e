//! Exact currency amounts in euro cents.
//!
//! # Text form
//!
//! Amounts are entered and displayed in the German notation used at the box
//! office counter:
//!
//! ```text
//! -?E{1,9}(,CC)?( €)?
//! ```
//!
//! - an optional leading `-`,
//! - one to nine euro digits,
//! - optionally a `,` followed by exactly two cent digits,
//! - optionally a trailing ` €`.
//!
//! The canonical rendering always shows cents and the currency sign, e.g.
//! `1000,00 €` or `-0,01 €`.  The sign belongs to the whole amount, so
//! `-0,01` is minus one cent.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ValueError;

/// Maximum number of digits in the euro part of a parsed amount.
pub const MAX_EURO_DIGITS: usize = 9;

const CURRENCY_SUFFIX: &str = " €";

/// Error returned when text is not a well-formed money amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("malformed money amount {0:?}: expected -?E{{1,9}}(,CC)?( €)?")]
    Malformed(String),
}

/// An exact amount of money, stored as an integer number of cents.
///
/// Arithmetic never mutates an amount; every operation returns a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoneyAmount {
    cents: i64,
}

impl MoneyAmount {
    pub const ZERO: MoneyAmount = MoneyAmount { cents: 0 };

    /// Largest amount the text form can express, `999999999,99 €`.
    pub const MAX: MoneyAmount = MoneyAmount {
        cents: 99_999_999_999,
    };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Builds an amount from a euro part and a cent part in `0..=99`.
    ///
    /// A negative `euros` makes the whole amount negative.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::CentsOutOfRange`] if `cents > 99`, or
    /// [`ValueError::EurosOutOfRange`] if the amount does not fit in cents.
    pub fn from_parts(euros: i64, cents: u8) -> Result<Self, ValueError> {
        if cents > 99 {
            return Err(ValueError::CentsOutOfRange(cents));
        }
        let magnitude = euros
            .checked_abs()
            .and_then(|e| e.checked_mul(100))
            .and_then(|c| c.checked_add(i64::from(cents)))
            .ok_or(ValueError::EurosOutOfRange(euros))?;
        Ok(Self::from_cents(if euros < 0 { -magnitude } else { magnitude }))
    }

    /// Returns `true` if `text` is a well-formed amount (see module docs).
    pub fn is_valid(text: &str) -> bool {
        parse_cents(text).is_some()
    }

    /// Parses the text form described in the module docs.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyParseError::Malformed`] for anything else.
    pub fn parse(text: &str) -> Result<Self, MoneyParseError> {
        parse_cents(text)
            .map(Self::from_cents)
            .ok_or_else(|| MoneyParseError::Malformed(text.to_string()))
    }

    pub const fn cents(&self) -> i64 {
        self.cents
    }

    pub const fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies this amount by an integer factor.
    ///
    /// Overflow panics in debug builds; use [`MoneyAmount::checked_times`]
    /// when the operands are not already bounded.
    pub const fn times(self, factor: i64) -> Self {
        Self::from_cents(self.cents * factor)
    }

    /// Multiplies this amount by `factor`, or returns `None` on overflow.
    pub const fn checked_times(self, factor: i64) -> Option<Self> {
        match self.cents.checked_mul(factor) {
            Some(cents) => Some(Self::from_cents(cents)),
            None => None,
        }
    }
}

/// Returns the amount in cents, or `None` if `text` is malformed.
fn parse_cents(text: &str) -> Option<i64> {
    let body = text.strip_suffix(CURRENCY_SUFFIX).unwrap_or(text);
    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let (euros, cents) = match body.split_once(',') {
        Some((euros, cents)) => (euros, Some(cents)),
        None => (body, None),
    };

    if euros.is_empty() || euros.len() > MAX_EURO_DIGITS || !all_digits(euros) {
        return None;
    }
    let cents = match cents {
        Some(cents) if cents.len() == 2 && all_digits(cents) => cents.parse::<i64>().ok()?,
        Some(_) => return None,
        None => 0,
    };

    let magnitude = euros.parse::<i64>().ok()? * 100 + cents;
    Some(if negative { -magnitude } else { magnitude })
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.cents.unsigned_abs();
        write!(f, "{sign}{},{:02}{CURRENCY_SUFFIX}", magnitude / 100, magnitude % 100)
    }
}

impl FromStr for MoneyAmount {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MoneyAmount {
    type Error = MoneyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MoneyAmount> for String {
    fn from(amount: MoneyAmount) -> Self {
        amount.to_string()
    }
}

impl Add for MoneyAmount {
    type Output = MoneyAmount;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_cents(self.cents + rhs.cents)
    }
}

impl Sub for MoneyAmount {
    type Output = MoneyAmount;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_cents(self.cents - rhs.cents)
    }
}

impl Neg for MoneyAmount {
    type Output = MoneyAmount;

    fn neg(self) -> Self::Output {
        Self::from_cents(-self.cents)
    }
}

impl Mul<u32> for MoneyAmount {
    type Output = MoneyAmount;

    fn mul(self, rhs: u32) -> Self::Output {
        self.times(i64::from(rhs))
    }
}

impl Sum for MoneyAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MoneyAmount> for MoneyAmount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
