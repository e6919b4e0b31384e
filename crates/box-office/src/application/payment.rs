//! Settling a sale: comparing the tendered amount with the amount due.

use cinema_core::MoneyAmount;

/// Result of checking what the customer handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The entered text is not a money amount.
    Invalid,
    /// Not enough was handed over; `missing` is still owed.
    Insufficient { missing: MoneyAmount },
    /// The sale can go ahead; `change` is handed back.
    Paid { change: MoneyAmount },
}

impl PaymentOutcome {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentOutcome::Paid { .. })
    }
}

/// Settles `due` against the cashier's entry `tendered`.
///
/// Blank or malformed input is [`PaymentOutcome::Invalid`].  A well-formed
/// negative amount is accepted as text but never covers a price, so it ends up
/// as [`PaymentOutcome::Insufficient`].
pub fn settle(due: MoneyAmount, tendered: &str) -> PaymentOutcome {
    let Ok(amount) = MoneyAmount::parse(tendered.trim()) else {
        return PaymentOutcome::Invalid;
    };

    if amount >= due {
        PaymentOutcome::Paid {
            change: amount - due,
        }
    } else {
        PaymentOutcome::Insufficient {
            missing: due - amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(text: &str) -> MoneyAmount {
        MoneyAmount::parse(text).unwrap()
    }

    #[test]
    fn test_exact_amount_gives_zero_change() {
        assert_eq!(
            settle(money("14,00"), "14"),
            PaymentOutcome::Paid {
                change: MoneyAmount::ZERO
            }
        );
    }

    #[test]
    fn test_overpayment_gives_change() {
        // Arrange
        let due = money("27,00");

        // Act
        let outcome = settle(due, "50,00 €");

        // Assert
        assert_eq!(
            outcome,
            PaymentOutcome::Paid {
                change: money("23,00")
            }
        );
        assert!(outcome.is_paid());
    }

    #[test]
    fn test_underpayment_reports_missing_amount() {
        assert_eq!(
            settle(money("18,00"), "10,50"),
            PaymentOutcome::Insufficient {
                missing: money("7,50")
            }
        );
    }

    #[test]
    fn test_malformed_or_blank_entry_is_invalid() {
        for entry in ["", "   ", "zehn", "10.00", "10,5"] {
            assert_eq!(settle(money("5"), entry), PaymentOutcome::Invalid, "{entry:?}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(settle(money("5"), " 5 ").is_paid());
    }

    #[test]
    fn test_negative_entry_never_pays() {
        assert_eq!(
            settle(money("5"), "-5"),
            PaymentOutcome::Insufficient {
                missing: money("10")
            }
        );
    }
}
