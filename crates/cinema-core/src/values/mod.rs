//! Immutable value types.
//!
//! Each type here is validated when it is built and compares by value, so it
//! can be used directly as a key in the [`collections`](crate::collections)
//! containers.

pub mod date;
pub mod money;
pub mod rating;
pub mod seat;
pub mod time;

pub use date::CalendarDate;
pub use money::{MoneyAmount, MoneyParseError};
pub use rating::AgeRating;
pub use seat::SeatCoordinate;
pub use time::ClockTime;

use std::str::FromStr;

use thiserror::Error;

/// Errors raised when a value type is built from invalid components or text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("{day}.{month}.{year} is not a calendar date")]
    InvalidDate { day: u32, month: u32, year: i32 },

    #[error("{hour}:{minute:02} is not a time of day")]
    InvalidTime { hour: u8, minute: u8 },

    #[error("cent part {0} is outside 0..=99")]
    CentsOutOfRange(u8),

    #[error("{0} euros cannot be represented in cents")]
    EurosOutOfRange(i64),

    #[error("malformed time {0:?}: expected H:MM")]
    MalformedTime(String),

    #[error("malformed seat {0:?}: expected row-seat")]
    MalformedSeat(String),

    #[error("malformed date {0:?}: expected d.m.yyyy")]
    MalformedDate(String),
}

/// Parses a non-empty run of ASCII digits.  Signs, spaces and other
/// characters that `FromStr` for integers would tolerate are rejected.
pub(crate) fn parse_digits<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
