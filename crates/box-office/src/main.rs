//! Box office entry point.
//!
//! Loads the programme from the config file, builds the cinema and runs the
//! cashier console on standard input.
//!
//! # Usage
//!
//! ```text
//! box-office                 # today's programme from the system clock
//! box-office 20.5.2011       # pretend it is 20 May 2011
//! box-office --write-config  # save the current configuration and exit
//! ```
//!
//! Log output goes to standard error so it does not mix with console replies.
//! `RUST_LOG` overrides the configured `log_level`.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use box_office::application::build_programme::build_programme;
use box_office::application::showing_picker::Calendar;
use box_office::infrastructure::clock::{FixedCalendar, SystemCalendar};
use box_office::infrastructure::console::{Console, Reply};
use box_office::infrastructure::storage::config::{
    config_file_path, load_config, save_config, AppConfig,
};
use cinema_core::CalendarDate;

fn main() -> anyhow::Result<()> {
    // Logging is configured from the file, so load it first and report
    // problems once the subscriber is up.
    let loaded = load_config();
    let log_level = loaded
        .as_ref()
        .map(|cfg| cfg.box_office.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("could not load config ({e}); using the built-in programme");
            AppConfig::default()
        }
    };
    info!("Box office v{} starting", cfg.box_office.version);

    let mut pinned_date = None;
    for arg in std::env::args().skip(1) {
        if arg == "--write-config" {
            save_config(&cfg).context("failed to write config")?;
            info!("config written to {}", config_file_path()?.display());
            return Ok(());
        }
        let date: CalendarDate = arg
            .parse()
            .with_context(|| format!("expected a date like 20.5.2011, got {arg:?}"))?;
        pinned_date = Some(date);
    }

    match pinned_date {
        Some(date) => run(&cfg, FixedCalendar(date)),
        None => run(&cfg, SystemCalendar),
    }
}

fn run<C: Calendar>(cfg: &AppConfig, calendar: C) -> anyhow::Result<()> {
    let cinema = build_programme(calendar.today(), &cfg.programme())
        .context("the configured programme is invalid")?;
    let mut console = Console::new(cinema, calendar);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    if let Reply::Lines(lines) = console.handle_line("plan") {
        print_lines(&mut stdout, &lines)?;
    }
    writeln!(stdout, "Type `help` for a list of commands.")?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match console.handle_line(&line) {
            Reply::Lines(lines) => print_lines(&mut stdout, &lines)?,
            Reply::Quit => break,
        }
    }

    info!("Box office closed");
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
