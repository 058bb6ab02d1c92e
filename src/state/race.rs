use chrono::{DateTime, NaiveDate, Utc};

use crate::countdown::Target;

/// A Grand Prix weekend from the season calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Race {
    pub season: String,
    pub round: u32,
    /// e.g., "Australian Grand Prix"
    pub name: String,
    pub circuit: String,
    pub locality: String,
    pub country: String,
    /// Race day as published (`YYYY-MM-DD`)
    pub date: String,
    /// Lights-out time as published (`HH:MM:SSZ`). Absent until announced.
    pub time: Option<String>,
}

impl Race {
    /// Countdown target for lights out. Unknown while the time is unannounced.
    pub fn start_target(&self) -> Target {
        Target::from_parts(&self.date, self.time.as_deref())
    }

    /// Race day, if the published date is well formed.
    pub fn race_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// Whether the race is still ahead of `now`.
    ///
    /// With a known start time, the start must be after `now`. Date-only
    /// races stay upcoming through the whole race day (UTC).
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        match self.start_target() {
            Target::At(start) => start > now,
            Target::Unknown => self
                .race_day()
                .map(|day| day >= now.date_naive())
                .unwrap_or(false),
        }
    }

    /// "Melbourne, Australia"
    pub fn location(&self) -> String {
        format!("{}, {}", self.locality, self.country)
    }
}

#[cfg(test)]
pub(crate) fn race(round: u32, date: &str, time: Option<&str>) -> Race {
    Race {
        season: "2025".into(),
        round,
        name: format!("Round {} Grand Prix", round),
        circuit: "Test Circuit".into(),
        locality: "Melbourne".into(),
        country: "Australia".into(),
        date: date.into(),
        time: time.map(String::from),
    }
}
