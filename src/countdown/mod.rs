mod clock;
mod driver;

pub use clock::{Clock, SystemClock};
pub use driver::Countdown;

#[cfg(test)]
pub use clock::{FixedClock, PausedClock};

use chrono::{DateTime, NaiveDateTime, Utc};

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// What a countdown counts down to.
///
/// Absent or unparsable timestamps become `Unknown` instead of a sentinel
/// instant, so they can never leak into arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    At(DateTime<Utc>),
    Unknown,
}

impl Target {
    /// Parse an ISO-8601-like timestamp.
    ///
    /// Accepts RFC 3339 (any offset, normalised to UTC) and date+time without
    /// an offset, which is read as UTC. Date-only input has no start time and
    /// maps to `Unknown`, same as garbage.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Target::At(dt.with_timezone(&Utc));
        }

        // Offset without seconds
        if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M%:z") {
            return Target::At(dt.with_timezone(&Utc));
        }

        // A trailing Z only restates the UTC default
        let naive = input
            .strip_suffix(|c: char| c == 'Z' || c == 'z')
            .unwrap_or(input);
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(naive, fmt) {
                return Target::At(naive.and_utc());
            }
        }

        Target::Unknown
    }

    /// Build a target from the separate `date` / `time` fields the schedule
    /// API publishes (`"2025-03-16"`, `"04:00:00Z"`).
    pub fn from_parts(date: &str, time: Option<&str>) -> Self {
        match time.map(str::trim).filter(|t| !t.is_empty()) {
            Some(time) if has_zone(time) => Self::parse(&format!("{}T{}", date.trim(), time)),
            Some(time) => Self::parse(&format!("{}T{}Z", date.trim(), time)),
            None => Target::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Target::At(_))
    }
}

/// Whether a time-of-day already carries a zone: `Z`/`z` or `±HH:MM`.
fn has_zone(time: &str) -> bool {
    if time.ends_with(|c: char| c == 'Z' || c == 'z') {
        return true;
    }

    let bytes = time.as_bytes();
    let n = bytes.len();
    n > 6
        && matches!(bytes[n - 6], b'+' | b'-')
        && bytes[n - 3] == b':'
        && [n - 5, n - 4, n - 2, n - 1]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit())
}

impl From<Option<&str>> for Target {
    fn from(input: Option<&str>) -> Self {
        input.map(Target::parse).unwrap_or(Target::Unknown)
    }
}

/// Time left until a target, broken down for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemainingDuration {
    pub total_seconds_remaining: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub is_expired: bool,
}

impl RemainingDuration {
    /// The zeroed state shown once the target has passed or when there is
    /// no valid target.
    pub fn expired() -> Self {
        Self {
            is_expired: true,
            ..Self::default()
        }
    }

    /// Break a positive number of seconds into days/hours/minutes/seconds.
    /// Zero collapses to the expired state.
    pub fn from_secs(total: u64) -> Self {
        if total == 0 {
            return Self::expired();
        }

        Self {
            total_seconds_remaining: total,
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
            is_expired: false,
        }
    }
}

/// Time remaining from `now` until `target`.
///
/// Sub-second remainders are truncated toward zero. Unknown targets and
/// targets not after `now` yield `RemainingDuration::expired()`.
pub fn compute_remaining(now: DateTime<Utc>, target: &Target) -> RemainingDuration {
    let Target::At(target) = target else {
        return RemainingDuration::expired();
    };

    let diff = (*target - now).num_seconds();
    if diff <= 0 {
        return RemainingDuration::expired();
    }

    RemainingDuration::from_secs(diff as u64)
}
