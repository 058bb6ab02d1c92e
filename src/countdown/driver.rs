use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, trace};

use super::{compute_remaining, Clock, RemainingDuration, Target};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Ticks buffered between the timer task and the display.
const TICK_BUFFER: usize = 4;

/// A running countdown: one periodic task plus the channel it reports on.
///
/// The task computes once immediately and then once per second. Each target
/// gets a fresh task and a fresh channel, so ticks computed against an old
/// target are discarded with the old receiver. Dropping the handle aborts
/// the task.
pub struct Countdown {
    target: Target,
    clock: Arc<dyn Clock>,
    rx: mpsc::Receiver<RemainingDuration>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Start counting down to `target`. Must be called inside a tokio runtime.
    pub fn start(target: Target, clock: Arc<dyn Clock>) -> Self {
        let (rx, task) = spawn_ticker(target, clock.clone());
        debug!(?target, "countdown started");

        Self {
            target,
            clock,
            rx,
            task,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Switch to a different target.
    ///
    /// The old task is aborted and its channel dropped before the new one is
    /// spawned. Passing the current target is a no-op and keeps the running
    /// timer.
    pub fn retarget(&mut self, target: Target) {
        if target == self.target {
            return;
        }

        self.task.abort();
        let (rx, task) = spawn_ticker(target, self.clock.clone());
        self.rx = rx;
        self.task = task;

        debug!(from = ?self.target, to = ?target, "countdown retargeted");
        self.target = target;
    }

    /// Wait for the next tick. Returns `None` only if the timer task died.
    pub async fn next(&mut self) -> Option<RemainingDuration> {
        self.rx.recv().await
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn spawn_ticker(
    target: Target,
    clock: Arc<dyn Clock>,
) -> (mpsc::Receiver<RemainingDuration>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(TICK_BUFFER);

    let task = tokio::spawn(async move {
        let mut interval = time::interval(TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // First tick completes immediately
            interval.tick().await;

            let remaining = compute_remaining(clock.now(), &target);
            trace!(total = remaining.total_seconds_remaining, "tick");

            if tx.send(remaining).await.is_err() {
                // Receiver gone
                break;
            }
        }
    });

    (rx, task)
}
