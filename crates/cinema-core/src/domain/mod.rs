//! Domain entities for the box office.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: no files, no clocks, no terminals.
//!
//! # How the pieces fit together (for beginners)
//!
//! - A [`SeatingHall`](hall::SeatingHall) is a fixed grid of seats.
//! - A [`Film`](film::Film) is what gets shown.
//! - A [`Showing`](showing::Showing) is one screening of a film in a hall at
//!   a date and time.  It owns the sold/unsold state of every seat and is the
//!   only place where tickets are sold or cancelled.
//! - A [`DaySchedule`](day_schedule::DaySchedule) lists one day's showings in
//!   start-time order.
//! - A [`Cinema`](cinema::Cinema) owns everything and answers "what runs on
//!   this date?".
//!
//! Outer layers (the `box-office` crate) depend on these types; nothing here
//! depends on them.

pub mod cinema;
pub mod day_schedule;
pub mod film;
pub mod hall;

/// The seat-booking engine.
///
/// See [`showing::Showing`] for the main type.
pub mod showing;
