use std::io::{self, Write};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::JolpicaClient;
use crate::countdown::{Clock, Countdown, RemainingDuration};
use crate::events::Event;
use crate::render::countdown_text;
use crate::schedule::{self, Outlook};
use crate::state::Race;

/// Spawns a task that sends Shutdown on Ctrl+C.
fn spawn_shutdown(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        let _ = tx.send(Event::Shutdown).await;
    });
}

/// First race in `races` still ahead of `now`.
fn next_race(races: &[Race], now: DateTime<Utc>) -> Option<Race> {
    schedule::upcoming(races, now, 1).into_iter().next()
}

/// What the live loop does after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Advance {
    /// Current race hasn't started; keep counting
    Keep,
    /// Current race started; count down to this one instead
    Retarget(Race),
    /// Known races exhausted; fetch the calendar again
    NeedsRefresh,
    /// Nothing left to count down to
    Done,
}

/// Decide whether a tick means moving on from `current`.
///
/// A date-only race ticks as expired all day long, so the race must also
/// have left the upcoming window before the loop moves on.
fn advance(
    current: &Race,
    races: &[Race],
    remaining: &RemainingDuration,
    now: DateTime<Utc>,
) -> Advance {
    if !remaining.is_expired || current.is_upcoming(now) {
        return Advance::Keep;
    }

    match next_race(races, now) {
        Some(race) => Advance::Retarget(race),
        None => Advance::NeedsRefresh,
    }
}

/// Second chance after re-fetching the calendar.
fn after_refresh(races: &[Race], now: DateTime<Utc>) -> Advance {
    match next_race(races, now) {
        Some(race) => Advance::Retarget(race),
        None => Advance::Done,
    }
}

/// Redraw a one-line countdown to the next race every second until Ctrl+C.
///
/// When a race starts the countdown moves on to the following one, fetching
/// the calendar again if the known races have run out.
pub async fn watch(
    client: &JolpicaClient,
    outlook: Outlook,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<()> {
    let mut races = outlook.races().to_vec();
    let Some(mut current) = next_race(&races, clock.now()) else {
        println!("No upcoming race to count down to.");
        return Ok(());
    };

    let (tx, mut rx) = mpsc::channel::<Event>(1);
    spawn_shutdown(tx);

    let mut countdown = Countdown::start(current.start_target(), clock.clone());
    info!(race = %current.name, "watching countdown (Ctrl+C to quit)");

    let mut stdout = io::stdout();
    loop {
        let event = tokio::select! {
            tick = countdown.next() => match tick {
                Some(remaining) => Event::Tick(remaining),
                None => Event::Shutdown,
            },
            Some(event) = rx.recv() => event,
        };

        match event {
            Event::Tick(remaining) => {
                write!(
                    stdout,
                    "\r\x1b[2K{} · {}",
                    current.name,
                    countdown_text(&remaining, countdown.target())
                )?;
                stdout.flush()?;

                let now = clock.now();
                let mut step = advance(&current, &races, &remaining, now);
                if step == Advance::Keep {
                    continue;
                }

                writeln!(stdout)?;
                info!(race = %current.name, "race started");

                if step == Advance::NeedsRefresh {
                    step = match schedule::load_outlook(client, now, usize::MAX).await {
                        Ok(fresh) => {
                            races = fresh.races().to_vec();
                            after_refresh(&races, now)
                        }
                        Err(e) => {
                            warn!(error = %e, "failed to refresh calendar");
                            Advance::Done
                        }
                    };
                }

                match step {
                    Advance::Retarget(race) => {
                        info!(race = %race.name, "counting down to next race");
                        countdown.retarget(race.start_target());
                        current = race;
                    }
                    _ => {
                        println!("No further races scheduled.");
                        break;
                    }
                }
            }
            Event::Shutdown => {
                writeln!(stdout)?;
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
