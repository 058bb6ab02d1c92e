//! Plain-text pages.
//!
//! Every renderer returns a `String` so pages can be printed, redrawn, or
//! asserted on in tests without touching stdout.

mod calendar;
mod constructors;
mod drivers;
mod home;

pub use calendar::calendar;
pub use constructors::constructors;
pub use drivers::drivers;
pub use home::home;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::countdown::{RemainingDuration, Target};
use crate::state::{Race, Rgb};

pub const EM_DASH: &str = "—";
pub const TO_BE_ANNOUNCED: &str = "To be announced";
pub const TIME_UP: &str = "Time's up!";

/// Terminal capabilities for a render pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Style {
    /// Emit 24-bit ANSI colour for team accents
    pub color: bool,
}

impl Style {
    /// A coloured block for a team accent, or nothing when colour is off.
    pub fn swatch(&self, color: Rgb) -> String {
        if self.color {
            format!("\x1b[38;2;{};{};{}m■\x1b[0m ", color.0, color.1, color.2)
        } else {
            String::new()
        }
    }
}

/// `01 day 02 hours 00 minutes 01 second`, "Time's up!" once expired, or
/// "To be announced" when there is nothing to count down to.
pub fn countdown_text(remaining: &RemainingDuration, target: &Target) -> String {
    if !target.is_known() {
        return TO_BE_ANNOUNCED.to_string();
    }
    if remaining.is_expired {
        return TIME_UP.to_string();
    }

    [
        (remaining.days, "day", "days"),
        (remaining.hours, "hour", "hours"),
        (remaining.minutes, "minute", "minutes"),
        (remaining.seconds, "second", "seconds"),
    ]
    .iter()
    .map(|(value, one, many)| format!("{:02} {}", value, if *value == 1 { one } else { many }))
    .collect::<Vec<_>>()
    .join(" ")
}

/// `Sun, Mar 16 2025`, falling back to the raw date string.
pub fn race_date_label(race: &Race) -> String {
    match race.start_target() {
        Target::At(start) => start.format("%a, %b %-d %Y").to_string(),
        Target::Unknown => race
            .race_day()
            .map(|day| day.format("%a, %b %-d %Y").to_string())
            .unwrap_or_else(|| race.date.clone()),
    }
}

/// `04:00 UTC`, or "TBD" while the start time is unpublished.
pub fn race_time_label(race: &Race) -> String {
    match race.start_target() {
        Target::At(start) => start.format("%H:%M UTC").to_string(),
        Target::Unknown => "TBD".to_string(),
    }
}

/// Short label for the hero "next Grand Prix" line.
pub fn next_race_label(race: Option<&Race>) -> String {
    let Some(race) = race else {
        return TO_BE_ANNOUNCED.to_string();
    };

    match (race.start_target(), race.race_day()) {
        (Target::At(start), _) => start.format("%b %-d, %H:%M UTC").to_string(),
        (Target::Unknown, Some(day)) => day_label(day),
        (Target::Unknown, None) => TO_BE_ANNOUNCED.to_string(),
    }
}

fn day_label(day: NaiveDate) -> String {
    day.format("%b %-d, %Y").to_string()
}

/// `25`, `25.5`: no trailing zeros.
pub fn points(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn plural(count: u32, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

/// Shared race card used by the home page.
pub(crate) fn race_card(race: &Race, remaining: &RemainingDuration) -> Vec<String> {
    vec![
        format!("  Round {} · Season {}", race.round, race.season),
        format!("  {}", race.name),
        format!("  {}", race.circuit),
        format!("    Event date     {}", race_date_label(race)),
        format!("    Lights out     {}", race_time_label(race)),
        format!("    Venue          {}", race.location()),
        format!(
            "    Lights out in  {}",
            countdown_text(remaining, &race.start_target())
        ),
    ]
}
