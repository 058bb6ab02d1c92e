use chrono::{DateTime, Utc};

use super::{countdown_text, race_date_label, race_time_label};
use crate::countdown::compute_remaining;
use crate::state::Race;

/// Whole-season calendar, one race per line, with the next race marked.
pub fn calendar(races: &[Race], now: DateTime<Utc>) -> String {
    let Some(first) = races.first() else {
        return "No race calendar published yet.".to_string();
    };

    let next_round = races.iter().find(|r| r.is_upcoming(now)).map(|r| r.round);

    let mut lines = vec![format!("RACE CALENDAR · Season {}", first.season), String::new()];

    for race in races {
        let marker = if Some(race.round) == next_round { "▶" } else { " " };
        let target = race.start_target();
        // Undated races have nothing to finish yet
        let status = if race.is_upcoming(now) || race.race_day().is_none() {
            countdown_text(&compute_remaining(now, &target), &target)
        } else {
            "Finished".to_string()
        };

        lines.push(format!(
            "{} R{:02}  {:<17} {:<9}  {}",
            marker,
            race.round,
            race_date_label(race),
            race_time_label(race),
            race.name
        ));
        lines.push(format!("        {} · {}", race.location(), status));
    }

    lines.join("\n")
}
