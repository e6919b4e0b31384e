//! Age ratings issued by the FSK (Freiwillige Selbstkontrolle der Filmwirtschaft).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum viewer age for a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgeRating {
    Fsk0,
    Fsk6,
    Fsk12,
    Fsk16,
    Fsk18,
}

impl AgeRating {
    /// The youngest age admitted without an accompanying adult.
    pub const fn minimum_age(&self) -> u8 {
        match self {
            AgeRating::Fsk0 => 0,
            AgeRating::Fsk6 => 6,
            AgeRating::Fsk12 => 12,
            AgeRating::Fsk16 => 16,
            AgeRating::Fsk18 => 18,
        }
    }
}

impl fmt::Display for AgeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FSK {}", self.minimum_age())
    }
}
