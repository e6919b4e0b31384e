//! Showings: one screening of a film, and the seat-booking engine behind it.
//!
//! A [`Showing`] owns the sale state of every seat in its hall.  Seats are
//! either unsold (the initial state) or sold; there is no reservation or
//! pending state.  Callers work with *selections*, sets of
//! [`SeatCoordinate`]s held in a [`ValueHashSet`], and the showing sells or
//! cancels a whole selection at once.
//!
//! # Atomicity (for beginners)
//!
//! "All-or-nothing" means a multi-seat sale either marks every selected seat
//! as sold or leaves the showing exactly as it was.  [`Showing::sell_seats`]
//! achieves this by checking every seat first and only then mutating; the
//! check and the mutation cannot interleave with another sale because
//! `sell_seats` takes `&mut self`, so the borrow checker guarantees nobody
//! else is touching the showing at the same time.
//!
//! # Grid layout
//!
//! The sold flags live in one flat `Vec<bool>` indexed
//! `row * seats_per_row + seat`, sized once at construction and never resized.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::collections::ValueHashSet;
use crate::domain::film::Film;
use crate::domain::hall::SeatingHall;
use crate::values::{CalendarDate, ClockTime, MoneyAmount, SeatCoordinate};

/// Unique identifier for a showing, derived from UUID v4.
pub type ShowingId = Uuid;

/// Errors returned by [`Showing`] operations.
///
/// Every error is returned before the showing is modified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShowingError {
    /// Ticket prices cannot be negative.
    #[error("ticket price {0} is negative")]
    NegativePrice(MoneyAmount),

    #[error("ticket price {0} exceeds {max}", max = MoneyAmount::MAX)]
    PriceTooHigh(MoneyAmount),

    /// The total for the selection does not fit in a [`MoneyAmount`].
    #[error("price of {seats} seat(s) overflows")]
    PriceOverflow { seats: usize },

    /// The seat does not exist in this showing's hall.
    #[error("seat {seat} is outside hall {hall:?}")]
    SeatOutsideHall { seat: SeatCoordinate, hall: String },

    #[error("seat {0} is already sold")]
    SeatAlreadySold(SeatCoordinate),

    #[error("seat {0} has not been sold")]
    SeatNotSold(SeatCoordinate),

    /// The selection contains the listed seats, which are already sold.
    #[error("selection cannot be sold, already sold: {}", join_seats(.0))]
    SelectionNotSellable(Vec<SeatCoordinate>),

    /// The selection contains the listed seats, which are not sold.
    #[error("selection cannot be cancelled, not sold: {}", join_seats(.0))]
    SelectionNotCancellable(Vec<SeatCoordinate>),
}

fn join_seats(seats: &[SeatCoordinate]) -> String {
    seats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One screening of a film in a hall, with its own seat sale state.
#[derive(Debug, Clone)]
pub struct Showing {
    id: ShowingId,
    hall: SeatingHall,
    film: Film,
    date: CalendarDate,
    start: ClockTime,
    end: ClockTime,
    price: MoneyAmount,
    /// Sold flag per seat, row-major.
    sold: Vec<bool>,
    /// Number of `true` entries in `sold`.
    sold_count: usize,
}

impl Showing {
    /// Creates a showing with every seat unsold and a fresh random id.
    ///
    /// `end` may be earlier than `start` for showings that run past midnight.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::NegativePrice`] if `price` is below zero, or
    /// [`ShowingError::PriceTooHigh`] above [`MoneyAmount::MAX`].
    pub fn new(
        hall: SeatingHall,
        film: Film,
        date: CalendarDate,
        start: ClockTime,
        end: ClockTime,
        price: MoneyAmount,
    ) -> Result<Self, ShowingError> {
        if price.is_negative() {
            return Err(ShowingError::NegativePrice(price));
        }
        if price > MoneyAmount::MAX {
            return Err(ShowingError::PriceTooHigh(price));
        }
        let sold = vec![false; hall.capacity()];
        Ok(Self {
            id: Uuid::new_v4(),
            hall,
            film,
            date,
            start,
            end,
            price,
            sold,
            sold_count: 0,
        })
    }

    pub fn id(&self) -> ShowingId {
        self.id
    }

    pub fn hall(&self) -> &SeatingHall {
        &self.hall
    }

    pub fn film(&self) -> &Film {
        &self.film
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Price of a single seat.
    pub fn price(&self) -> MoneyAmount {
        self.price
    }

    /// Running time in minutes, wrapping past midnight.
    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes_since(self.start)
    }

    // ── Single seats ──────────────────────────────────────────────────────────

    /// Returns `true` if `seat` exists in this showing's hall.
    pub fn is_in_hall(&self, seat: SeatCoordinate) -> bool {
        self.hall.contains(seat)
    }

    /// Returns whether `seat` is sold.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::SeatOutsideHall`] for seats outside the hall.
    pub fn is_sold(&self, seat: SeatCoordinate) -> Result<bool, ShowingError> {
        let index = self.index_of(seat)?;
        Ok(self.sold[index])
    }

    /// Marks a single unsold seat as sold.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::SeatOutsideHall`] or
    /// [`ShowingError::SeatAlreadySold`]; the showing is unchanged in both cases.
    pub fn sell_seat(&mut self, seat: SeatCoordinate) -> Result<(), ShowingError> {
        let index = self.index_of(seat)?;
        if self.sold[index] {
            return Err(ShowingError::SeatAlreadySold(seat));
        }
        self.mark(index, true);
        debug!("showing {}: seat {seat} sold", self.id);
        Ok(())
    }

    /// Returns a single sold seat to the unsold state.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::SeatOutsideHall`] or
    /// [`ShowingError::SeatNotSold`]; the showing is unchanged in both cases.
    pub fn cancel_seat(&mut self, seat: SeatCoordinate) -> Result<(), ShowingError> {
        let index = self.index_of(seat)?;
        if !self.sold[index] {
            return Err(ShowingError::SeatNotSold(seat));
        }
        self.mark(index, false);
        debug!("showing {}: seat {seat} cancelled", self.id);
        Ok(())
    }

    // ── Selections ────────────────────────────────────────────────────────────

    /// Returns `true` if every seat in `seats` exists in the hall.
    pub fn contains_all(&self, seats: &ValueHashSet<SeatCoordinate>) -> bool {
        seats.iter().all(|&seat| self.is_in_hall(seat))
    }

    /// Returns `true` if none of `seats` is sold.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::SeatOutsideHall`] if any seat is outside the hall.
    pub fn can_sell(&self, seats: &ValueHashSet<SeatCoordinate>) -> Result<bool, ShowingError> {
        Ok(self.seats_in_state(seats, true)?.is_empty())
    }

    /// Returns `true` if every one of `seats` is sold.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::SeatOutsideHall`] if any seat is outside the hall.
    pub fn can_cancel(&self, seats: &ValueHashSet<SeatCoordinate>) -> Result<bool, ShowingError> {
        Ok(self.seats_in_state(seats, false)?.is_empty())
    }

    /// Sells every seat in `seats`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::SeatOutsideHall`] if any seat is outside the
    /// hall, or [`ShowingError::SelectionNotSellable`] listing the seats that
    /// are already sold.  No seat changes state on error.
    pub fn sell_seats(&mut self, seats: &ValueHashSet<SeatCoordinate>) -> Result<(), ShowingError> {
        let already_sold = self.seats_in_state(seats, true)?;
        if !already_sold.is_empty() {
            return Err(ShowingError::SelectionNotSellable(already_sold));
        }
        for &seat in seats {
            self.mark(self.index_unchecked(seat), true);
        }
        debug!(
            "showing {}: sold {} seat(s), {} of {} now sold",
            self.id,
            seats.size(),
            self.sold_count,
            self.hall.capacity()
        );
        Ok(())
    }

    /// Cancels every seat in `seats`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::SeatOutsideHall`] if any seat is outside the
    /// hall, or [`ShowingError::SelectionNotCancellable`] listing the seats
    /// that are not sold.  No seat changes state on error.
    pub fn cancel_seats(&mut self, seats: &ValueHashSet<SeatCoordinate>) -> Result<(), ShowingError> {
        let unsold = self.seats_in_state(seats, false)?;
        if !unsold.is_empty() {
            return Err(ShowingError::SelectionNotCancellable(unsold));
        }
        for &seat in seats {
            self.mark(self.index_unchecked(seat), false);
        }
        debug!(
            "showing {}: cancelled {} seat(s), {} of {} now sold",
            self.id,
            seats.size(),
            self.sold_count,
            self.hall.capacity()
        );
        Ok(())
    }

    /// Total price of `seats`: the unit price times the number of distinct seats.
    ///
    /// # Errors
    ///
    /// Returns [`ShowingError::SeatOutsideHall`] if any seat is outside the
    /// hall, or [`ShowingError::PriceOverflow`] if the total is unrepresentable.
    pub fn price_for(&self, seats: &ValueHashSet<SeatCoordinate>) -> Result<MoneyAmount, ShowingError> {
        self.check_all_in_hall(seats)?;
        let count = seats.size();
        i64::try_from(count)
            .ok()
            .and_then(|n| self.price.checked_times(n))
            .ok_or(ShowingError::PriceOverflow { seats: count })
    }

    // ── Aggregates ────────────────────────────────────────────────────────────

    /// Number of sold seats.  Constant time.
    pub fn sold_seat_count(&self) -> usize {
        self.sold_count
    }

    pub fn free_seat_count(&self) -> usize {
        self.hall.capacity() - self.sold_count
    }

    /// The set of sold seats.
    pub fn sold_seats(&self) -> ValueHashSet<SeatCoordinate> {
        self.hall
            .seats()
            .zip(&self.sold)
            .filter_map(|(seat, &sold)| sold.then_some(seat))
            .collect()
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn index_of(&self, seat: SeatCoordinate) -> Result<usize, ShowingError> {
        if self.is_in_hall(seat) {
            Ok(self.index_unchecked(seat))
        } else {
            Err(ShowingError::SeatOutsideHall {
                seat,
                hall: self.hall.name().to_string(),
            })
        }
    }

    /// Grid index of an in-hall seat.
    fn index_unchecked(&self, seat: SeatCoordinate) -> usize {
        seat.row() as usize * self.hall.seats_per_row() as usize + seat.seat() as usize
    }

    fn check_all_in_hall(&self, seats: &ValueHashSet<SeatCoordinate>) -> Result<(), ShowingError> {
        seats.iter().try_for_each(|&seat| self.index_of(seat).map(drop))
    }

    /// Returns the seats of `seats` whose sold flag equals `sold`, sorted.
    fn seats_in_state(
        &self,
        seats: &ValueHashSet<SeatCoordinate>,
        sold: bool,
    ) -> Result<Vec<SeatCoordinate>, ShowingError> {
        self.check_all_in_hall(seats)?;
        let mut matching: Vec<SeatCoordinate> = seats
            .iter()
            .copied()
            .filter(|&seat| self.sold[self.index_unchecked(seat)] == sold)
            .collect();
        matching.sort_unstable();
        Ok(matching)
    }

    fn mark(&mut self, index: usize, sold: bool) {
        if self.sold[index] != sold {
            self.sold[index] = sold;
            if sold {
                self.sold_count += 1;
            } else {
                self.sold_count -= 1;
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::AgeRating;

    fn seat(row: u32, seat: u32) -> SeatCoordinate {
        SeatCoordinate::new(row, seat)
    }

    fn money(text: &str) -> MoneyAmount {
        MoneyAmount::parse(text).expect("valid test amount")
    }

    fn make_showing(rows: u32, seats_per_row: u32, price: &str) -> Showing {
        Showing::new(
            SeatingHall::new("Saal 1", rows, seats_per_row).unwrap(),
            Film::new("Rio", 96, AgeRating::Fsk0, false).unwrap(),
            CalendarDate::new(15, 5, 2011).unwrap(),
            ClockTime::new(17, 30).unwrap(),
            ClockTime::new(19, 20).unwrap(),
            money(price),
        )
        .unwrap()
    }

    // ── construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_new_showing_has_no_sold_seats() {
        let showing = make_showing(16, 20, "8,00");
        assert_eq!(showing.sold_seat_count(), 0);
        assert_eq!(showing.free_seat_count(), 320);
        assert!(showing.hall().seats().all(|s| !showing.is_sold(s).unwrap()));
    }

    #[test]
    fn test_new_rejects_negative_price() {
        let result = Showing::new(
            SeatingHall::new("Saal 1", 1, 1).unwrap(),
            Film::new("Rio", 96, AgeRating::Fsk0, false).unwrap(),
            CalendarDate::new(15, 5, 2011).unwrap(),
            ClockTime::new(17, 30).unwrap(),
            ClockTime::new(19, 20).unwrap(),
            money("-0,01"),
        );
        assert_eq!(result.unwrap_err(), ShowingError::NegativePrice(money("-0,01")));
    }

    #[test]
    fn test_new_rejects_price_above_max() {
        let too_high = MoneyAmount::from_cents(i64::MAX / 2);
        let result = Showing::new(
            SeatingHall::new("Saal 1", 2, 2).unwrap(),
            Film::new("Rio", 96, AgeRating::Fsk0, false).unwrap(),
            CalendarDate::new(15, 5, 2011).unwrap(),
            ClockTime::new(17, 30).unwrap(),
            ClockTime::new(19, 20).unwrap(),
            too_high,
        );
        assert_eq!(result.unwrap_err(), ShowingError::PriceTooHigh(too_high));
    }

    #[test]
    fn test_price_for_full_hall_at_max_price() {
        // Arrange
        let showing = make_showing(2, 2, "999999999,99 €");
        let all: ValueHashSet<SeatCoordinate> = showing.hall().seats().collect();

        // Act
        let total = showing.price_for(&all).unwrap();

        // Assert
        assert_eq!(total, MoneyAmount::MAX.times(4));
    }

    #[test]
    fn test_free_showing_is_allowed() {
        let showing = make_showing(1, 1, "0");
        assert_eq!(showing.price(), MoneyAmount::ZERO);
    }

    #[test]
    fn test_duration_wraps_past_midnight() {
        let showing = Showing::new(
            SeatingHall::new("Saal 1", 1, 1).unwrap(),
            Film::new("Thor", 115, AgeRating::Fsk12, false).unwrap(),
            CalendarDate::new(15, 5, 2011).unwrap(),
            ClockTime::new(22, 30).unwrap(),
            ClockTime::new(0, 25).unwrap(),
            money("9"),
        )
        .unwrap();
        assert_eq!(showing.duration_minutes(), 115);
    }

    #[test]
    fn test_each_showing_gets_unique_id() {
        let a = make_showing(1, 1, "5");
        let b = make_showing(1, 1, "5");
        assert_ne!(a.id(), b.id());
    }

    // ── hall membership ───────────────────────────────────────────────────────

    #[test]
    fn test_is_in_hall_matches_grid_bounds() {
        let showing = make_showing(3, 4, "5");
        assert!(showing.is_in_hall(seat(0, 0)));
        assert!(showing.is_in_hall(seat(2, 3)));
        assert!(!showing.is_in_hall(seat(3, 0)));
        assert!(!showing.is_in_hall(seat(0, 4)));
    }

    #[test]
    fn test_contains_all_requires_every_seat_in_hall() {
        let showing = make_showing(2, 2, "5");
        assert!(showing.contains_all(&ValueHashSet::from([seat(0, 0), seat(1, 1)])));
        assert!(!showing.contains_all(&ValueHashSet::from([seat(0, 0), seat(2, 0)])));
        assert!(showing.contains_all(&ValueHashSet::new()));
    }

    #[test]
    fn test_is_sold_rejects_seat_outside_hall() {
        let showing = make_showing(2, 2, "5");
        assert_eq!(
            showing.is_sold(seat(5, 5)),
            Err(ShowingError::SeatOutsideHall {
                seat: seat(5, 5),
                hall: "Saal 1".to_string(),
            })
        );
    }

    // ── single seats ──────────────────────────────────────────────────────────

    #[test]
    fn test_sell_seat_then_cancel_seat() {
        // Arrange
        let mut showing = make_showing(2, 2, "5");

        // Act / Assert
        showing.sell_seat(seat(1, 0)).unwrap();
        assert!(showing.is_sold(seat(1, 0)).unwrap());
        assert_eq!(showing.sold_seat_count(), 1);

        showing.cancel_seat(seat(1, 0)).unwrap();
        assert!(!showing.is_sold(seat(1, 0)).unwrap());
        assert_eq!(showing.sold_seat_count(), 0);
    }

    #[test]
    fn test_sell_seat_twice_is_rejected() {
        let mut showing = make_showing(2, 2, "5");
        showing.sell_seat(seat(0, 1)).unwrap();
        assert_eq!(
            showing.sell_seat(seat(0, 1)),
            Err(ShowingError::SeatAlreadySold(seat(0, 1)))
        );
        assert_eq!(showing.sold_seat_count(), 1);
    }

    #[test]
    fn test_cancel_unsold_seat_is_rejected() {
        let mut showing = make_showing(2, 2, "5");
        assert_eq!(
            showing.cancel_seat(seat(0, 1)),
            Err(ShowingError::SeatNotSold(seat(0, 1)))
        );
    }

    #[test]
    fn test_n_disjoint_sells_give_count_n() {
        let mut showing = make_showing(10, 16, "5");
        for s in 0..16 {
            showing.sell_seat(seat(4, s)).unwrap();
        }
        assert_eq!(showing.sold_seat_count(), 16);
        assert_eq!(showing.sold_seats().size(), 16);
    }

    // ── selections ────────────────────────────────────────────────────────────

    #[test]
    fn test_two_by_two_hall_scenario() {
        // Arrange
        let mut showing = make_showing(2, 2, "5,00");

        // Act
        showing
            .sell_seats(&ValueHashSet::from([seat(0, 0), seat(0, 1)]))
            .unwrap();

        // Assert
        assert_eq!(showing.sold_seat_count(), 2);
        assert!(!showing
            .can_sell(&ValueHashSet::from([seat(0, 0), seat(1, 0)]))
            .unwrap());
        assert!(showing
            .can_cancel(&ValueHashSet::from([seat(0, 0), seat(0, 1)]))
            .unwrap());
        assert_eq!(
            showing
                .price_for(&ValueHashSet::from([seat(1, 0), seat(1, 1)]))
                .unwrap(),
            money("10,00")
        );
    }

    #[test]
    fn test_sell_seats_with_overlap_changes_nothing() {
        // Arrange
        let mut showing = make_showing(3, 3, "5");
        showing.sell_seat(seat(1, 1)).unwrap();
        let selection = ValueHashSet::from([seat(0, 0), seat(1, 1), seat(2, 2)]);

        // Act
        let result = showing.sell_seats(&selection);

        // Assert
        assert_eq!(result, Err(ShowingError::SelectionNotSellable(vec![seat(1, 1)])));
        assert!(!showing.is_sold(seat(0, 0)).unwrap());
        assert!(!showing.is_sold(seat(2, 2)).unwrap());
        assert_eq!(showing.sold_seat_count(), 1);
    }

    #[test]
    fn test_sell_seats_with_seat_outside_hall_changes_nothing() {
        let mut showing = make_showing(2, 2, "5");
        let selection = ValueHashSet::from([seat(0, 0), seat(9, 9)]);
        assert!(matches!(
            showing.sell_seats(&selection),
            Err(ShowingError::SeatOutsideHall { .. })
        ));
        assert_eq!(showing.sold_seat_count(), 0);
    }

    #[test]
    fn test_cancel_seats_requires_every_seat_sold() {
        // Arrange
        let mut showing = make_showing(2, 2, "5");
        showing.sell_seat(seat(0, 0)).unwrap();
        let selection = ValueHashSet::from([seat(0, 0), seat(1, 1), seat(1, 0)]);

        // Act
        let result = showing.cancel_seats(&selection);

        // Assert
        assert_eq!(
            result,
            Err(ShowingError::SelectionNotCancellable(vec![seat(1, 0), seat(1, 1)]))
        );
        assert!(showing.is_sold(seat(0, 0)).unwrap());
    }

    #[test]
    fn test_cancel_seats_returns_selection_to_unsold() {
        let mut showing = make_showing(2, 2, "5");
        let selection = ValueHashSet::from([seat(0, 0), seat(1, 1)]);
        showing.sell_seats(&selection).unwrap();

        showing.cancel_seats(&selection).unwrap();

        assert_eq!(showing.sold_seat_count(), 0);
        assert!(showing.can_sell(&selection).unwrap());
    }

    #[test]
    fn test_empty_selection_is_sellable_and_cancellable() {
        let mut showing = make_showing(2, 2, "5");
        let empty = ValueHashSet::new();
        assert!(showing.can_sell(&empty).unwrap());
        assert!(showing.can_cancel(&empty).unwrap());
        showing.sell_seats(&empty).unwrap();
        assert_eq!(showing.sold_seat_count(), 0);
    }

    #[test]
    fn test_can_sell_rejects_seat_outside_hall() {
        let showing = make_showing(2, 2, "5");
        assert!(showing.can_sell(&ValueHashSet::from([seat(2, 0)])).is_err());
        assert!(showing.can_cancel(&ValueHashSet::from([seat(0, 2)])).is_err());
    }

    // ── pricing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_price_for_multiplies_unit_price_by_selection_size() {
        let showing = make_showing(5, 5, "9,00");
        let selection = ValueHashSet::from([seat(0, 0), seat(0, 1), seat(0, 2)]);
        assert_eq!(showing.price_for(&selection).unwrap(), money("27,00"));
    }

    #[test]
    fn test_price_for_empty_selection_is_zero() {
        let showing = make_showing(5, 5, "9,00");
        assert_eq!(showing.price_for(&ValueHashSet::new()).unwrap(), money("0,00"));
    }

    #[test]
    fn test_price_for_counts_equal_coordinates_once() {
        let showing = make_showing(5, 5, "7,50");
        let selection: ValueHashSet<_> = [seat(1, 1), seat(1, 1), seat(2, 2)].into_iter().collect();
        assert_eq!(showing.price_for(&selection).unwrap(), money("15,00"));
    }

    #[test]
    fn test_price_for_rejects_seat_outside_hall() {
        let showing = make_showing(1, 1, "5");
        assert!(showing.price_for(&ValueHashSet::from([seat(0, 1)])).is_err());
    }

    // ── aggregates ────────────────────────────────────────────────────────────

    #[test]
    fn test_sold_seats_reflects_sales() {
        let mut showing = make_showing(3, 3, "5");
        let selection = ValueHashSet::from([seat(0, 2), seat(2, 0)]);
        showing.sell_seats(&selection).unwrap();
        assert_eq!(showing.sold_seats(), selection);
        assert_eq!(showing.free_seat_count(), 7);
    }

    #[test]
    fn test_error_message_lists_conflicting_seats() {
        let err = ShowingError::SelectionNotSellable(vec![seat(0, 1), seat(2, 3)]);
        assert_eq!(err.to_string(), "selection cannot be sold, already sold: 0-1, 2-3");
    }
}
