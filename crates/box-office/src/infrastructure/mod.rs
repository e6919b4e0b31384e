//! Infrastructure layer for the box office.
//!
//! Contains the outward-facing adapters: the system calendar, file-system
//! configuration storage, and the text console the cashier types into.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `cinema_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod clock;
pub mod console;
pub mod storage;
