//! Text console: the cashier's front end.
//!
//! Each input line is parsed into a [`Command`], executed against the shared
//! [`Console`] state, and answered with a [`Reply`] of printable lines.  The
//! console never prints by itself, so the binary decides where output goes and
//! tests can inspect replies directly.
//!
//! # Commands
//!
//! | Command            | Effect                                              |
//! |--------------------|-----------------------------------------------------|
//! | `help`             | list commands                                       |
//! | `today`            | jump to today's programme                           |
//! | `next` / `prev`    | move one day forward / back                         |
//! | `plan`             | show the selected day's showings                    |
//! | `show <n>`         | select showing number `n` of the day                |
//! | `seats`            | draw the seat map of the selected showing           |
//! | `select r-s …`     | toggle one or more seats in the selection           |
//! | `clear`            | empty the selection                                 |
//! | `price`            | price of the selection                              |
//! | `change <amount>`  | change due if the customer pays `amount`            |
//! | `sell <amount>`    | sell the selection, paying `amount` (e.g. `20,00`)  |
//! | `cancel`           | cancel the selection                                |
//! | `quit`             | leave the console                                   |
//!
//! # Seat map legend
//!
//! `.` free, `X` sold, `+` selected and free, `#` selected and sold.

use std::fmt::Write as _;
use std::str::FromStr;

use cinema_core::{Cinema, SeatCoordinate, Showing};
use thiserror::Error;
use tracing::warn;

use crate::application::payment::{settle, PaymentOutcome};
use crate::application::showing_picker::{Calendar, ShowingPicker};
use crate::application::ticket_counter::{CounterError, TicketCounter};

/// Errors produced while parsing an input line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("{0:?} is not a showing number")]
    BadShowingNumber(String),

    #[error("{0:?} is not a seat, expected row-seat such as 3-7")]
    BadSeat(String),
}

/// One cashier command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Today,
    Next,
    Prev,
    Plan,
    /// One-based position in the day's schedule.
    Show(usize),
    Seats,
    Select(Vec<SeatCoordinate>),
    Clear,
    Price,
    /// Tendered amount as typed; previews the payment without selling.
    Change(String),
    /// Tendered amount as typed.
    Sell(String),
    Cancel,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let rest: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "today" => Command::Today,
            "next" => Command::Next,
            "prev" => Command::Prev,
            "plan" => Command::Plan,
            "show" => {
                let arg = rest.first().ok_or(CommandError::MissingArgument {
                    command: "show",
                    expected: "a showing number",
                })?;
                match arg.parse::<usize>() {
                    Ok(n) if n >= 1 => Command::Show(n),
                    _ => return Err(CommandError::BadShowingNumber(arg.to_string())),
                }
            }
            "seats" => Command::Seats,
            "select" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "select",
                        expected: "at least one seat",
                    });
                }
                let seats = rest
                    .iter()
                    .map(|word| {
                        word.parse::<SeatCoordinate>()
                            .map_err(|_| CommandError::BadSeat(word.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Command::Select(seats)
            }
            "clear" => Command::Clear,
            "price" => Command::Price,
            "change" => Command::Change(amount_argument("change", &rest)?),
            "sell" => Command::Sell(amount_argument("sell", &rest)?),
            "cancel" => Command::Cancel,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };
        Ok(command)
    }
}

/// What the console answers to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Lines to show the cashier.
    Lines(Vec<String>),
    /// The cashier asked to leave.
    Quit,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Reply::Lines(vec![text.into()])
    }

    pub fn lines(&self) -> &[String] {
        match self {
            Reply::Lines(lines) => lines,
            Reply::Quit => &[],
        }
    }
}

/// The running box office: the cinema plus the cashier's working state.
pub struct Console<C: Calendar> {
    calendar: C,
    cinema: Cinema,
    picker: ShowingPicker,
    counter: TicketCounter,
}

impl<C: Calendar> Console<C> {
    /// Opens the console on today's programme.
    pub fn new(cinema: Cinema, calendar: C) -> Self {
        let picker = ShowingPicker::new(&calendar, &cinema);
        let mut counter = TicketCounter::new();
        counter.switch_to(picker.selected());
        Self {
            calendar,
            cinema,
            picker,
            counter,
        }
    }

    pub fn cinema(&self) -> &Cinema {
        &self.cinema
    }

    pub fn picker(&self) -> &ShowingPicker {
        &self.picker
    }

    pub fn counter(&self) -> &TicketCounter {
        &self.counter
    }

    /// Parses and executes one input line.  Blank lines produce no output.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::Lines(Vec::new());
        }
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(e) => {
                warn!("rejected input {line:?}: {e}");
                Reply::line(e.to_string())
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Help => Reply::Lines(help_lines()),
            Command::Today => {
                self.picker.today(&self.calendar, &self.cinema);
                self.after_date_change()
            }
            Command::Next => {
                self.picker.next_day(&self.cinema);
                self.after_date_change()
            }
            Command::Prev => {
                self.picker.previous_day(&self.cinema);
                self.after_date_change()
            }
            Command::Plan => Reply::Lines(self.render_plan()),
            Command::Show(number) => self.show(number),
            Command::Seats => self.seats(),
            Command::Select(seats) => self.select(&seats),
            Command::Clear => {
                self.counter.clear_selection();
                Reply::line("Selection cleared.")
            }
            Command::Price => self.price(),
            Command::Change(tendered) => match self.selected_showing() {
                Some(showing) => Reply::line(preview_payment(showing, &self.counter, &tendered)),
                None => no_showing(),
            },
            Command::Sell(tendered) => self.sell(&tendered),
            Command::Cancel => self.cancel(),
            Command::Quit => Reply::Quit,
        }
    }

    // ── Command handlers ──────────────────────────────────────────────────────

    fn after_date_change(&mut self) -> Reply {
        self.counter.switch_to(self.picker.selected());
        Reply::Lines(self.render_plan())
    }

    fn show(&mut self, number: usize) -> Reply {
        let Some(index) = number.checked_sub(1) else {
            return Reply::line("Showings are numbered from 1.");
        };
        match self.picker.pick(index, &self.cinema) {
            Ok(id) => {
                self.counter.switch_to(Some(id));
                match self.cinema.showing(id) {
                    Some(showing) => Reply::line(format!("Selected {}", describe(showing))),
                    None => Reply::line("Showing not found."),
                }
            }
            Err(e) => {
                warn!("{e}");
                Reply::line(e.to_string())
            }
        }
    }

    fn seats(&self) -> Reply {
        match self.selected_showing() {
            Some(showing) => Reply::Lines(render_seat_map(showing, &self.counter)),
            None => no_showing(),
        }
    }

    fn select(&mut self, seats: &[SeatCoordinate]) -> Reply {
        let Some(id) = self.picker.selected() else {
            return no_showing();
        };
        let Some(showing) = self.cinema.showing(id) else {
            return no_showing();
        };

        let mut lines = Vec::new();
        for &seat in seats {
            match self.counter.toggle_seat(showing, seat) {
                Ok(true) => lines.push(format!("{seat} selected")),
                Ok(false) => lines.push(format!("{seat} deselected")),
                Err(e) => {
                    warn!("{e}");
                    lines.push(e.to_string());
                }
            }
        }
        lines.push(self.selection_summary(showing));
        Reply::Lines(lines)
    }

    fn price(&self) -> Reply {
        match self.selected_showing() {
            Some(showing) => Reply::line(self.selection_summary(showing)),
            None => no_showing(),
        }
    }

    fn sell(&mut self, tendered: &str) -> Reply {
        let Some(id) = self.picker.selected() else {
            return no_showing();
        };
        let Some(showing) = self.cinema.showing_mut(id) else {
            return no_showing();
        };

        match self.counter.sell(showing, tendered) {
            Ok(sale) => Reply::Lines(vec![
                format!(
                    "Sold {} seat(s): {}",
                    sale.seats.len(),
                    join(sale.seats.iter())
                ),
                format!("Total: {}", sale.price),
                format!("Change: {}", sale.change),
            ]),
            Err(CounterError::InsufficientPayment { missing }) => {
                warn!("payment short by {missing}");
                Reply::line(format!("Missing: {missing}. Nothing sold."))
            }
            Err(e) => {
                warn!("sale rejected: {e}");
                Reply::line(format!("Not sold: {e}"))
            }
        }
    }

    fn cancel(&mut self) -> Reply {
        let Some(id) = self.picker.selected() else {
            return no_showing();
        };
        let Some(showing) = self.cinema.showing_mut(id) else {
            return no_showing();
        };

        match self.counter.cancel(showing) {
            Ok(seats) => Reply::line(format!(
                "Cancelled {} seat(s): {}",
                seats.len(),
                join(seats.iter())
            )),
            Err(e) => {
                warn!("cancellation rejected: {e}");
                Reply::line(format!("Not cancelled: {e}"))
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn selected_showing(&self) -> Option<&Showing> {
        self.picker.selected().and_then(|id| self.cinema.showing(id))
    }

    fn render_plan(&self) -> Vec<String> {
        let schedule = self.picker.schedule(&self.cinema);
        let mut lines = vec![format!("Programme for {}:", schedule.date())];
        if schedule.is_empty() {
            lines.push("  no showings".to_string());
        }
        for (i, showing) in schedule.iter().enumerate() {
            let marker = if Some(showing.id()) == self.picker.selected() {
                '*'
            } else {
                ' '
            };
            lines.push(format!(
                "{marker}[{}] {}  {:>3} free",
                i + 1,
                describe(showing),
                showing.free_seat_count()
            ));
        }
        lines
    }

    fn selection_summary(&self, showing: &Showing) -> String {
        let seats = self.counter.selected_seats();
        let price = self
            .counter
            .price(showing)
            .map(|p| p.to_string())
            .unwrap_or_else(|e| e.to_string());
        format!(
            "Selection: {} | price {} | sell: {} | cancel: {}",
            if seats.is_empty() {
                "none".to_string()
            } else {
                join(seats.iter())
            },
            price,
            yes_no(self.counter.can_sell(showing)),
            yes_no(self.counter.can_cancel(showing)),
        )
    }
}

/// Human-readable form of a settled payment.
pub fn describe_payment(outcome: PaymentOutcome) -> String {
    match outcome {
        PaymentOutcome::Invalid => "No valid payment entered".to_string(),
        PaymentOutcome::Insufficient { missing } => format!("Missing: {missing}"),
        PaymentOutcome::Paid { change } => format!("Change: {change}"),
    }
}

/// One-line description of a showing, e.g. `17:30-20:00  Saal 1  Rio, FSK 0  5,00 €`.
pub fn describe(showing: &Showing) -> String {
    format!(
        "{}-{}  {}  {}  {}",
        showing.start(),
        showing.end(),
        showing.hall(),
        showing.film(),
        showing.price()
    )
}

/// Draws the hall with sold and selected seats marked.
pub fn render_seat_map(showing: &Showing, counter: &TicketCounter) -> Vec<String> {
    let hall = showing.hall();
    let sold = showing.sold_seats();
    let selection = counter.selection();

    let mut lines = vec![format!(
        "{}  {} of {} seats sold",
        describe(showing),
        showing.sold_seat_count(),
        hall.capacity()
    )];

    let mut header = String::from("      ");
    for seat in 0..hall.seats_per_row() {
        let _ = write!(header, "{:>3}", seat);
    }
    lines.push(header);

    for row in 0..hall.row_count() {
        let mut line = format!("  {row:>2} |");
        for seat in 0..hall.seats_per_row() {
            let coordinate = SeatCoordinate::new(row, seat);
            let symbol = match (sold.contains(&coordinate), selection.contains(&coordinate)) {
                (false, false) => '.',
                (true, false) => 'X',
                (false, true) => '+',
                (true, true) => '#',
            };
            let _ = write!(line, "{symbol:>3}");
        }
        lines.push(line);
    }
    lines.push(". free  X sold  + selected  # selected (sold)".to_string());
    lines
}

/// Previews the outcome of paying `tendered` for the current selection.
pub fn preview_payment(showing: &Showing, counter: &TicketCounter, tendered: &str) -> String {
    match counter.price(showing) {
        Ok(due) => describe_payment(settle(due, tendered)),
        Err(e) => e.to_string(),
    }
}

fn help_lines() -> Vec<String> {
    [
        "help               list commands",
        "today | next | prev  change the day",
        "plan               show the day's programme",
        "show <n>           select showing number n",
        "seats              draw the seat map",
        "select r-s ...     toggle seats, e.g. select 3-4 3-5",
        "clear              empty the selection",
        "price              price of the selection",
        "change <amount>    change due for a payment, nothing is sold",
        "sell <amount>      sell the selection, e.g. sell 20,00",
        "cancel             cancel the selection",
        "quit               leave",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// "sell 20,00 €" arrives as two words.
fn amount_argument(command: &'static str, rest: &[&str]) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            expected: "the amount paid",
        });
    }
    Ok(rest.join(" "))
}

fn no_showing() -> Reply {
    Reply::line("No showing selected.")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn join<'a>(seats: impl Iterator<Item = &'a SeatCoordinate>) -> String {
    seats.map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
