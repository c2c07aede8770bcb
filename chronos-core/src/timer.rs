//! Cancelable periodic timers driven by an external loop.
//!
//! A [`PeriodicTimer`] does not run on its own thread. The owner calls
//! [`PeriodicTimer::poll`] with the current time and gets back how many
//! periods elapsed since the last poll, so a stalled loop catches up instead
//! of losing ticks.

use chrono::{DateTime, Duration, Local};

#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    interval: Duration,
    next_due: Option<DateTime<Local>>,
}

impl PeriodicTimer {
    /// Create a stopped timer. Non-positive intervals are clamped to one second.
    pub fn new(interval: Duration) -> Self {
        let interval = if interval <= Duration::zero() {
            Duration::seconds(1)
        } else {
            interval
        };
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)start the timer; the first period ends one interval after `now`.
    /// A deadline past the representable range leaves the timer stopped.
    pub fn start(&mut self, now: DateTime<Local>) {
        self.next_due = now.checked_add_signed(self.interval);
        if self.next_due.is_none() {
            tracing::warn!(
                interval_secs = self.interval.num_seconds(),
                "Timer deadline out of range"
            );
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of periods that completed up to `now`. Always 0 when stopped.
    pub fn poll(&mut self, now: DateTime<Local>) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut fired = 0;
        let mut next = Some(due);
        while due <= now {
            fired += 1;
            next = due.checked_add_signed(self.interval);
            match next {
                Some(n) => due = n,
                None => break,
            }
        }
        self.next_due = next;
        fired
    }
}
