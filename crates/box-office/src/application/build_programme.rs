//! BuildProgrammeUseCase: turns a programme description into a [`Cinema`].
//!
//! The main entry point is [`build_programme`], which converts a
//! [`ProgrammePlan`] (typically loaded from TOML) into a validated cinema.
//! Showings name their hall and film by text and place their date relative to
//! "today", so the same configuration file yields a fresh three-day programme
//! every time the box office starts.

use cinema_core::{
    AgeRating, CalendarDate, Cinema, CinemaError, ClockTime, Film, FilmError, HallError,
    MoneyAmount, SeatingHall, Showing, ShowingError, ValueHashMap,
};
use thiserror::Error;
use tracing::info;

/// Error type for programme building.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgrammeError {
    #[error(transparent)]
    Hall(#[from] HallError),

    #[error(transparent)]
    Film(#[from] FilmError),

    #[error("hall {0:?} is defined twice")]
    DuplicateHall(String),

    #[error("film {0:?} is defined twice")]
    DuplicateFilm(String),

    #[error("showing of {film:?} refers to unknown hall {hall:?}")]
    UnknownHall { hall: String, film: String },

    #[error("showing refers to unknown film {0:?}")]
    UnknownFilm(String),

    #[error("invalid showing of {film:?}: {source}")]
    Showing {
        film: String,
        #[source]
        source: ShowingError,
    },

    #[error(transparent)]
    Cinema(#[from] CinemaError),
}

/// Configuration for one hall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HallPlan {
    pub name: String,
    pub rows: u32,
    pub seats_per_row: u32,
}

/// Configuration for one film.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmPlan {
    pub title: String,
    pub length_minutes: u32,
    pub rating: AgeRating,
    pub overlength: bool,
}

/// Configuration for one showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowingPlan {
    /// Name of a hall in [`ProgrammePlan::halls`].
    pub hall: String,
    /// Title of a film in [`ProgrammePlan::films`].
    pub film: String,
    /// Days after "today"; 0 is today.
    pub day_offset: u32,
    pub start: ClockTime,
    pub end: ClockTime,
    pub price: MoneyAmount,
}

/// A whole programme: halls, films, and the showings that combine them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgrammePlan {
    pub halls: Vec<HallPlan>,
    pub films: Vec<FilmPlan>,
    pub showings: Vec<ShowingPlan>,
}

/// Builds the cinema described by `plan`, with day offsets counted from `today`.
///
/// # Errors
///
/// Returns a [`ProgrammeError`] for the first invalid hall, film or showing.
pub fn build_programme(today: CalendarDate, plan: &ProgrammePlan) -> Result<Cinema, ProgrammeError> {
    let mut halls: ValueHashMap<String, SeatingHall> = ValueHashMap::new();
    for hall in &plan.halls {
        let built = SeatingHall::new(hall.name.as_str(), hall.rows, hall.seats_per_row)?;
        if halls.put(hall.name.clone(), built).is_some() {
            return Err(ProgrammeError::DuplicateHall(hall.name.clone()));
        }
    }

    let mut films: ValueHashMap<String, Film> = ValueHashMap::new();
    for film in &plan.films {
        let built = Film::new(film.title.as_str(), film.length_minutes, film.rating, film.overlength)?;
        if films.put(film.title.clone(), built).is_some() {
            return Err(ProgrammeError::DuplicateFilm(film.title.clone()));
        }
    }

    let mut showings = Vec::with_capacity(plan.showings.len());
    for entry in &plan.showings {
        let hall = halls
            .get(entry.hall.as_str())
            .ok_or_else(|| ProgrammeError::UnknownHall {
                hall: entry.hall.clone(),
                film: entry.film.clone(),
            })?;
        let film = films
            .get(entry.film.as_str())
            .ok_or_else(|| ProgrammeError::UnknownFilm(entry.film.clone()))?;
        let showing = Showing::new(
            hall.clone(),
            film.clone(),
            today.plus_days(u64::from(entry.day_offset)),
            entry.start,
            entry.end,
            entry.price,
        )
        .map_err(|source| ProgrammeError::Showing {
            film: entry.film.clone(),
            source,
        })?;
        showings.push(showing);
    }

    // Keep the configured hall order.
    let hall_list = plan
        .halls
        .iter()
        .filter_map(|hall| halls.get(hall.name.as_str()).cloned())
        .collect();
    let cinema = Cinema::new(hall_list, showings)?;
    info!(
        "programme built: {} hall(s), {} film(s), {} showing(s) from {today}",
        cinema.halls().len(),
        films.size(),
        cinema.showing_count()
    );
    Ok(cinema)
}
