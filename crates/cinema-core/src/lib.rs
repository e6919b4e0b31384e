//! # cinema-core
//!
//! Domain library for the cinema box office: value types, the value-equality
//! hash containers, and the seat-booking engine.
//!
//! It has no dependencies on terminals, files or the system clock beyond
//! [`CalendarDate::today`].
//!
//! # Architecture overview (for beginners)
//!
//! A box office sells seats for showings.  The hard part is making sure that a
//! seat is never sold twice and that a group booking either gets every seat or
//! none.  This crate is organised leaf-first:
//!
//! - **`values`** – Small immutable types such as [`SeatCoordinate`] and
//!   [`MoneyAmount`].  They are validated on construction and compared by
//!   value.
//!
//! - **`collections`** – [`ValueHashMap`] and [`ValueHashSet`], the containers
//!   every identity lookup goes through.  A seat selection is a
//!   `ValueHashSet<SeatCoordinate>`.
//!
//! - **`domain`** – Halls, films, [`Showing`] (which owns the seat sale state)
//!   and the [`Cinema`] aggregate that groups showings by date.

pub mod collections;
pub mod domain;
pub mod values;

// Re-export the most-used types at the crate root so callers can write
// `cinema_core::Showing` instead of `cinema_core::domain::showing::Showing`.
pub use collections::{ValueHashMap, ValueHashSet};
pub use domain::cinema::{Cinema, CinemaError};
pub use domain::day_schedule::{DaySchedule, ScheduleError};
pub use domain::film::{Film, FilmError};
pub use domain::hall::{HallError, SeatingHall};
pub use domain::showing::{Showing, ShowingError, ShowingId};
pub use values::{
    AgeRating, CalendarDate, ClockTime, MoneyAmount, MoneyParseError, SeatCoordinate, ValueError,
};
