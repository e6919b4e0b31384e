//! Application layer use cases for the box office.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `cinema-core`) and the infrastructure (files,
//! terminal, system clock).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a cashier's goal (e.g., "sell
//!   these four seats once the customer has paid").
//! - **Depend on abstractions** (traits such as [`showing_picker::Calendar`])
//!   rather than concrete implementations.
//! - **Contain no terminal I/O and no file system access**.
//!
//! # Sub-modules
//!
//! - **`payment`**          – Checks the amount a customer hands over against
//!   the price and works out the change or the missing amount.
//!
//! - **`ticket_counter`**   – Holds the cashier's current seat selection and
//!   sells or cancels it on the selected showing.
//!
//! - **`showing_picker`**   – Tracks the selected date and showing.
//!
//! - **`build_programme`**  – Turns a configured programme into a validated
//!   [`Cinema`](cinema_core::Cinema).

pub mod build_programme;
pub mod payment;
pub mod showing_picker;
pub mod ticket_counter;
