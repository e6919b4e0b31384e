//! Seating halls (auditoriums).
//!
//! A hall is a rectangular grid of seats: `row_count` rows of
//! `seats_per_row` seats each.  Coordinates are zero-based, so the seat in the
//! back-right corner of a 16 × 20 hall is `15-19`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::values::SeatCoordinate;

/// Largest number of seats a hall may have.  Every showing allocates one sold
/// flag per seat up front, so the grid must stay small enough to allocate.
pub const MAX_SEATS: u64 = 100_000;

/// Errors that can occur when describing a hall.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HallError {
    /// A hall needs at least one row with at least one seat.
    #[error("hall {name:?} has an empty seat grid ({rows} × {seats_per_row})")]
    EmptyGrid {
        name: String,
        rows: u32,
        seats_per_row: u32,
    },

    #[error("hall {name:?} has {rows} × {seats_per_row} seats, more than {max}", max = MAX_SEATS)]
    TooLarge {
        name: String,
        rows: u32,
        seats_per_row: u32,
    },
}

/// An auditorium with a fixed rectangular seat grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SeatingHall {
    name: String,
    row_count: u32,
    seats_per_row: u32,
}

impl SeatingHall {
    /// Creates a hall.
    ///
    /// # Errors
    ///
    /// Returns [`HallError::EmptyGrid`] if either dimension is zero, or
    /// [`HallError::TooLarge`] if the grid has more than [`MAX_SEATS`] seats.
    pub fn new(
        name: impl Into<String>,
        row_count: u32,
        seats_per_row: u32,
    ) -> Result<Self, HallError> {
        let name = name.into();
        if row_count == 0 || seats_per_row == 0 {
            return Err(HallError::EmptyGrid {
                name,
                rows: row_count,
                seats_per_row,
            });
        }
        if u64::from(row_count) * u64::from(seats_per_row) > MAX_SEATS {
            return Err(HallError::TooLarge {
                name,
                rows: row_count,
                seats_per_row,
            });
        }
        Ok(Self {
            name,
            row_count,
            seats_per_row,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn seats_per_row(&self) -> u32 {
        self.seats_per_row
    }

    /// Total number of seats.
    pub fn capacity(&self) -> usize {
        self.row_count as usize * self.seats_per_row as usize
    }

    /// Returns `true` if `seat` lies inside the grid.
    pub fn contains(&self, seat: SeatCoordinate) -> bool {
        seat.row() < self.row_count && seat.seat() < self.seats_per_row
    }

    /// Every seat in the hall, front row first, left to right within a row.
    pub fn seats(&self) -> impl Iterator<Item = SeatCoordinate> + '_ {
        (0..self.row_count)
            .flat_map(move |row| (0..self.seats_per_row).map(move |seat| SeatCoordinate::new(row, seat)))
    }
}

impl fmt::Display for SeatingHall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
