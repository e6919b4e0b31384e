//! Seat coordinates within a hall.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{parse_digits, ValueError};

/// A seat in a hall, identified by its row and its position in that row.
///
/// Both components are zero-based.  Coordinates are plain values: any two
/// coordinates with the same row and seat are equal and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatCoordinate {
    row: u32,
    seat: u32,
}

impl SeatCoordinate {
    pub const fn new(row: u32, seat: u32) -> Self {
        Self { row, seat }
    }

    /// Zero-based row index.
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based index of the seat within its row.
    pub const fn seat(&self) -> u32 {
        self.seat
    }
}

impl fmt::Display for SeatCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.seat)
    }
}

/// Parses the `row-seat` form produced by `Display`, e.g. `"3-7"`.
impl FromStr for SeatCoordinate {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValueError::MalformedSeat(s.to_string());
        let (row, seat) = s.trim().split_once('-').ok_or_else(malformed)?;
        let row = parse_digits(row).ok_or_else(malformed)?;
        let seat = parse_digits(seat).ok_or_else(malformed)?;
        Ok(Self::new(row, seat))
    }
}
