//! TicketCounter: the cashier's seat selection and the sell/cancel workflow.
//!
//! The counter remembers which showing the cashier is working on and which
//! seats are currently selected.  Selecting a different showing discards the
//! selection, because seat coordinates only make sense within one hall.
//!
//! # Selling (for beginners)
//!
//! A sale goes through three steps:
//!
//! 1. The cashier toggles seats until the selection is what the customer wants.
//!    [`TicketCounter::can_sell`] and [`TicketCounter::price`] update live.
//! 2. The customer pays; the entered amount is settled with
//!    [`payment::settle`](super::payment::settle).
//! 3. Only if the payment covers the price are the seats sold, all at once,
//!    and the selection is cleared.

use cinema_core::{
    MoneyAmount, SeatCoordinate, Showing, ShowingError, ShowingId, ValueHashSet,
};
use thiserror::Error;
use tracing::{debug, info};

use super::payment::{settle, PaymentOutcome};

/// Errors returned by [`TicketCounter`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CounterError {
    /// The showing passed in is not the one the counter is working on.
    #[error("counter is not working on showing {0}")]
    WrongShowing(ShowingId),

    #[error("no seats selected")]
    EmptySelection,

    #[error("{0:?} is not a money amount")]
    InvalidPayment(String),

    #[error("payment is short by {missing}")]
    InsufficientPayment { missing: MoneyAmount },

    #[error(transparent)]
    Showing(#[from] ShowingError),
}

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub showing: ShowingId,
    /// Sold seats in row-major order.
    pub seats: Vec<SeatCoordinate>,
    pub price: MoneyAmount,
    pub change: MoneyAmount,
}

/// The cashier's working state for one showing at a time.
#[derive(Debug, Default)]
pub struct TicketCounter {
    showing: Option<ShowingId>,
    selection: ValueHashSet<SeatCoordinate>,
}

impl TicketCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The showing the counter is working on, if any.
    pub fn showing(&self) -> Option<ShowingId> {
        self.showing
    }

    /// Switches to `showing`, discarding the selection if it changes.
    pub fn switch_to(&mut self, showing: Option<ShowingId>) {
        if self.showing != showing {
            self.showing = showing;
            self.selection.clear();
        }
    }

    pub fn selection(&self) -> &ValueHashSet<SeatCoordinate> {
        &self.selection
    }

    /// The selected seats in row-major order.
    pub fn selected_seats(&self) -> Vec<SeatCoordinate> {
        let mut seats: Vec<_> = self.selection.iter().copied().collect();
        seats.sort_unstable();
        seats
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects `seat` if it is not selected, deselects it otherwise.
    ///
    /// Returns `true` if the seat is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::WrongShowing`] if `showing` is not the current
    /// showing, or [`ShowingError::SeatOutsideHall`] (wrapped) for seats
    /// outside its hall.
    pub fn toggle_seat(
        &mut self,
        showing: &Showing,
        seat: SeatCoordinate,
    ) -> Result<bool, CounterError> {
        self.check_showing(showing)?;
        if !showing.is_in_hall(seat) {
            return Err(ShowingError::SeatOutsideHall {
                seat,
                hall: showing.hall().name().to_string(),
            }
            .into());
        }
        Ok(self.selection.toggle(seat))
    }

    /// Returns `true` if the selection is non-empty and entirely unsold.
    pub fn can_sell(&self, showing: &Showing) -> bool {
        self.is_current(showing)
            && !self.selection.is_empty()
            && showing.can_sell(&self.selection).unwrap_or(false)
    }

    /// Returns `true` if the selection is non-empty and entirely sold.
    pub fn can_cancel(&self, showing: &Showing) -> bool {
        self.is_current(showing)
            && !self.selection.is_empty()
            && showing.can_cancel(&self.selection).unwrap_or(false)
    }

    /// Price of the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::WrongShowing`] if `showing` is not the current showing.
    pub fn price(&self, showing: &Showing) -> Result<MoneyAmount, CounterError> {
        self.check_showing(showing)?;
        Ok(showing.price_for(&self.selection)?)
    }

    /// Sells the selection once `tendered` covers its price.
    ///
    /// On success the selection is cleared.  On any error nothing is sold and
    /// the selection is kept, so the cashier can correct the payment.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::EmptySelection`], a payment error, or the
    /// showing's refusal (e.g. a selected seat is already sold).
    pub fn sell(&mut self, showing: &mut Showing, tendered: &str) -> Result<Sale, CounterError> {
        self.check_showing(showing)?;
        if self.selection.is_empty() {
            return Err(CounterError::EmptySelection);
        }
        if !showing.can_sell(&self.selection)? {
            let sold = showing.sold_seats();
            let taken = self
                .selected_seats()
                .into_iter()
                .filter(|seat| sold.contains(seat))
                .collect();
            return Err(ShowingError::SelectionNotSellable(taken).into());
        }

        let price = showing.price_for(&self.selection)?;
        let change = match settle(price, tendered) {
            PaymentOutcome::Paid { change } => change,
            PaymentOutcome::Insufficient { missing } => {
                return Err(CounterError::InsufficientPayment { missing })
            }
            PaymentOutcome::Invalid => {
                return Err(CounterError::InvalidPayment(tendered.to_string()))
            }
        };

        showing.sell_seats(&self.selection)?;
        let sale = Sale {
            showing: showing.id(),
            seats: self.selected_seats(),
            price,
            change,
        };
        self.selection.clear();
        info!(
            "sold {} seat(s) for {} ({} {}), change {}",
            sale.seats.len(),
            sale.price,
            showing.start(),
            showing.film().title(),
            sale.change
        );
        Ok(sale)
    }

    /// Cancels the selection and returns the cancelled seats.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::EmptySelection`] or the showing's refusal (e.g.
    /// a selected seat was never sold).
    pub fn cancel(&mut self, showing: &mut Showing) -> Result<Vec<SeatCoordinate>, CounterError> {
        self.check_showing(showing)?;
        if self.selection.is_empty() {
            return Err(CounterError::EmptySelection);
        }
        showing.cancel_seats(&self.selection)?;
        let seats = self.selected_seats();
        self.selection.clear();
        info!(
            "cancelled {} seat(s) ({} {})",
            seats.len(),
            showing.start(),
            showing.film().title()
        );
        Ok(seats)
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn is_current(&self, showing: &Showing) -> bool {
        self.showing == Some(showing.id())
    }

    fn check_showing(&self, showing: &Showing) -> Result<(), CounterError> {
        if self.is_current(showing) {
            Ok(())
        } else {
            debug!("counter asked about showing {} it is not working on", showing.id());
            Err(CounterError::WrongShowing(showing.id()))
        }
    }
}
