//! TOML-based configuration for the box office.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\BoxOffice\config.toml`
//! - Linux:    `~/.config/boxoffice/config.toml`
//! - macOS:    `~/Library/Application Support/BoxOffice/config.toml`
//!
//! The file describes the programme the box office starts with.  Example:
//!
//! ```toml
//! [box_office]
//! log_level = "debug"
//!
//! [[halls]]
//! name = "Saal 1"
//! rows = 20
//! seats_per_row = 25
//!
//! [[films]]
//! title = "Rio"
//! length_minutes = 96
//! rating = "FSK0"
//!
//! [[showings]]
//! hall = "Saal 1"
//! film = "Rio"
//! day_offset = 0
//! start = "17:30"
//! end = "20:00"
//! price = "5,00 €"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.  A file without
//! `[[halls]]`, `[[films]]` or `[[showings]]` tables therefore gets the
//! built-in sample programme: three halls, five films and nineteen showings
//! spread over today and the next two days.

use std::path::{Path, PathBuf};

use cinema_core::{AgeRating, ClockTime, MoneyAmount};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::build_programme::{FilmPlan, HallPlan, ProgrammePlan, ShowingPlan};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub box_office: BoxOfficeConfig,
    #[serde(default = "default_halls")]
    pub halls: Vec<HallEntry>,
    #[serde(default = "default_films")]
    pub films: Vec<FilmEntry>,
    #[serde(default = "default_showings")]
    pub showings: Vec<ShowingEntry>,
}

/// General box office settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxOfficeConfig {
    /// Schema version string – bump when breaking changes are introduced.
    #[serde(default = "default_version")]
    pub version: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// One hall of the cinema, at most 100 000 seats in total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HallEntry {
    pub name: String,
    pub rows: u32,
    pub seats_per_row: u32,
}

/// One film in the programme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilmEntry {
    pub title: String,
    pub length_minutes: u32,
    /// `"FSK0"`, `"FSK6"`, `"FSK12"`, `"FSK16"` or `"FSK18"`.
    pub rating: AgeRating,
    #[serde(default)]
    pub overlength: bool,
}

/// One showing, placed relative to the day the box office starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowingEntry {
    /// Name of a `[[halls]]` entry.
    pub hall: String,
    /// Title of a `[[films]]` entry.
    pub film: String,
    /// Days after today; 0 (the default) is today.
    #[serde(default)]
    pub day_offset: u32,
    /// `H:MM` or `HH:MM`.
    pub start: ClockTime,
    /// `H:MM` or `HH:MM`; earlier than `start` for showings past midnight.
    pub end: ClockTime,
    /// Ticket price in the box office notation, e.g. `"7,50 €"`.
    pub price: MoneyAmount,
}

impl AppConfig {
    /// The programme described by this configuration.
    pub fn programme(&self) -> ProgrammePlan {
        ProgrammePlan {
            halls: self.halls.iter().map(HallPlan::from).collect(),
            films: self.films.iter().map(FilmPlan::from).collect(),
            showings: self.showings.iter().map(ShowingPlan::from).collect(),
        }
    }
}

impl From<&HallEntry> for HallPlan {
    fn from(entry: &HallEntry) -> Self {
        Self {
            name: entry.name.clone(),
            rows: entry.rows,
            seats_per_row: entry.seats_per_row,
        }
    }
}

impl From<&FilmEntry> for FilmPlan {
    fn from(entry: &FilmEntry) -> Self {
        Self {
            title: entry.title.clone(),
            length_minutes: entry.length_minutes,
            rating: entry.rating,
            overlength: entry.overlength,
        }
    }
}

impl From<&ShowingEntry> for ShowingPlan {
    fn from(entry: &ShowingEntry) -> Self {
        Self {
            hall: entry.hall.clone(),
            film: entry.film.clone(),
            day_offset: entry.day_offset,
            start: entry.start,
            end: entry.end,
            price: entry.price,
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_version() -> String {
    "1.0".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

fn default_halls() -> Vec<HallEntry> {
    [("Saal 1", 20, 25), ("Saal 2", 16, 20), ("Saal 3", 10, 16)]
        .into_iter()
        .map(|(name, rows, seats_per_row)| HallEntry {
            name: name.to_string(),
            rows,
            seats_per_row,
        })
        .collect()
}

const PIRATES: &str = "Pirates of the Caribbean - Fremde Gezeiten";
const FAST_FIVE: &str = "Fast & Furious Five";
const RIO: &str = "Rio";
const ELEFANTEN: &str = "Wasser für die Elefanten";
const THOR: &str = "Thor";

fn default_films() -> Vec<FilmEntry> {
    [
        (PIRATES, 136, AgeRating::Fsk12, true),
        (FAST_FIVE, 130, AgeRating::Fsk12, true),
        (RIO, 96, AgeRating::Fsk0, false),
        (ELEFANTEN, 120, AgeRating::Fsk12, false),
        (THOR, 115, AgeRating::Fsk12, false),
    ]
    .into_iter()
    .map(|(title, length_minutes, rating, overlength)| FilmEntry {
        title: title.to_string(),
        length_minutes,
        rating,
        overlength,
    })
    .collect()
}

/// Slot boundaries as (hour, minute).
const AFTERNOON: (u8, u8) = (17, 30);
const EVENING: (u8, u8) = (20, 0);
const LATE: (u8, u8) = (22, 30);
const NIGHT: (u8, u8) = (1, 0);

fn default_showings() -> Vec<ShowingEntry> {
    // (day offset, hall, film, start, end, price in euros)
    let sample = [
        (0, "Saal 1", RIO, AFTERNOON, EVENING, 5),
        (0, "Saal 1", PIRATES, EVENING, LATE, 7),
        (0, "Saal 1", PIRATES, LATE, NIGHT, 7),
        (0, "Saal 2", ELEFANTEN, AFTERNOON, EVENING, 9),
        (0, "Saal 2", FAST_FIVE, LATE, NIGHT, 8),
        (0, "Saal 3", ELEFANTEN, EVENING, LATE, 10),
        (0, "Saal 3", THOR, LATE, NIGHT, 9),
        (1, "Saal 1", PIRATES, EVENING, LATE, 5),
        (1, "Saal 1", PIRATES, LATE, NIGHT, 7),
        (1, "Saal 2", RIO, AFTERNOON, EVENING, 9),
        (1, "Saal 2", THOR, EVENING, NIGHT, 8),
        (1, "Saal 3", ELEFANTEN, AFTERNOON, EVENING, 10),
        (1, "Saal 3", FAST_FIVE, LATE, NIGHT, 9),
        (2, "Saal 1", FAST_FIVE, EVENING, LATE, 5),
        (2, "Saal 1", FAST_FIVE, LATE, NIGHT, 7),
        (2, "Saal 2", RIO, AFTERNOON, EVENING, 9),
        (2, "Saal 2", PIRATES, EVENING, NIGHT, 8),
        (2, "Saal 3", ELEFANTEN, EVENING, LATE, 10),
        (2, "Saal 3", THOR, LATE, NIGHT, 9),
    ];
    sample
        .into_iter()
        .filter_map(|(day_offset, hall, film, start, end, euros)| {
            Some(ShowingEntry {
                hall: hall.to_string(),
                film: film.to_string(),
                day_offset,
                start: ClockTime::new(start.0, start.1).ok()?,
                end: ClockTime::new(end.0, end.1).ok()?,
                price: MoneyAmount::from_parts(euros, 0).ok()?,
            })
        })
        .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            box_office: BoxOfficeConfig::default(),
            halls: default_halls(),
            films: default_films(),
            showings: default_showings(),
        }
    }
}

impl Default for BoxOfficeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_level: default_log_level(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file, returning
/// `AppConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to the platform config file.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_file_path()?)
}

/// Persists `config` to `path`, creating its directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the `BoxOffice` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("BoxOffice"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("boxoffice"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/BoxOffice
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("BoxOffice")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
