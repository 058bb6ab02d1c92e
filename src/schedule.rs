use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, info};

use crate::api::{ApiError, JolpicaClient, Season};
use crate::state::Race;

/// Races still ahead of `now`, in calendar order, at most `limit`.
pub fn upcoming(races: &[Race], now: DateTime<Utc>, limit: usize) -> Vec<Race> {
    let mut ahead: Vec<&Race> = races.iter().filter(|r| r.is_upcoming(now)).collect();
    ahead.sort_by_key(|r| (r.race_day(), r.round));
    ahead.into_iter().take(limit).cloned().collect()
}

/// What the calendar looks like from today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outlook {
    /// Races left in the running season
    ThisSeason(Vec<Race>),
    /// Current season done; opening race(s) of the next one
    NextSeason(Vec<Race>),
    /// Nothing left this year and next year isn't published yet
    SeasonOver { year: i32 },
}

impl Outlook {
    pub fn races(&self) -> &[Race] {
        match self {
            Outlook::ThisSeason(races) | Outlook::NextSeason(races) => races,
            Outlook::SeasonOver { .. } => &[],
        }
    }

    pub fn next_race(&self) -> Option<&Race> {
        self.races().first()
    }
}

/// Pick upcoming races from this season's calendar, falling back to the
/// first race of next season once this one is finished.
pub fn resolve_outlook(
    current: &[Race],
    next_season: Option<&[Race]>,
    now: DateTime<Utc>,
    limit: usize,
) -> Outlook {
    let ahead = upcoming(current, now, limit);
    if !ahead.is_empty() {
        return Outlook::ThisSeason(ahead);
    }

    // Only the opener is shown for next season
    let next = next_season
        .map(|races| upcoming(races, now, 1))
        .unwrap_or_default();
    if next.is_empty() {
        Outlook::SeasonOver { year: now.year() }
    } else {
        Outlook::NextSeason(next)
    }
}

/// Fetch the current calendar and work out the outlook. Next season is only
/// fetched when this one has nothing left, and a failure there is treated as
/// "not published yet".
pub async fn load_outlook(
    client: &JolpicaClient,
    now: DateTime<Utc>,
    limit: usize,
) -> Result<Outlook, ApiError> {
    let current = client.schedule(Season::Current).await?;
    debug!(races = current.len(), "fetched current calendar");

    if !upcoming(&current, now, 1).is_empty() {
        return Ok(resolve_outlook(&current, None, now, limit));
    }

    let next_year = now.year() + 1;
    info!(next_year, "no races left this season, checking next calendar");
    let next = match client.schedule(Season::Year(next_year)).await {
        Ok(races) => Some(races),
        Err(e) => {
            debug!(error = %e, "next season calendar unavailable");
            None
        }
    };

    Ok(resolve_outlook(&current, next.as_deref(), now, limit))
}
