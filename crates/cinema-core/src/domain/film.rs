//! Films shown in the cinema.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::values::AgeRating;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilmError {
    #[error("film {0:?} has a running time of zero minutes")]
    ZeroLength(String),
}

/// A film with its running time and age rating.
///
/// `overlength` marks films long enough to carry a surcharge at the counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Film {
    title: String,
    length_minutes: u32,
    rating: AgeRating,
    overlength: bool,
}

impl Film {
    /// # Errors
    ///
    /// Returns [`FilmError::ZeroLength`] if `length_minutes` is zero.
    pub fn new(
        title: impl Into<String>,
        length_minutes: u32,
        rating: AgeRating,
        overlength: bool,
    ) -> Result<Self, FilmError> {
        let title = title.into();
        if length_minutes == 0 {
            return Err(FilmError::ZeroLength(title));
        }
        Ok(Self {
            title,
            length_minutes,
            rating,
            overlength,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn length_minutes(&self) -> u32 {
        self.length_minutes
    }

    pub fn rating(&self) -> AgeRating {
        self.rating
    }

    pub fn is_overlength(&self) -> bool {
        self.overlength
    }
}

impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.title, self.rating)
    }
}
