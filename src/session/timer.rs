//! Tick timing
//!
//! [`TickSchedule`] is the controller's record of what the tick trigger should
//! be doing. Every start or stop bumps its generation. [`TickTimer`] is the
//! tokio side: it rebuilds its interval whenever it sees a new generation, so
//! a changed period always gets a brand new trigger and at most one is ever
//! pending.

use std::future;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSchedule {
    period: Option<Duration>,
    generation: u64,
}

impl TickSchedule {
    /// Replace any current trigger with one firing every `period`
    pub fn start(&mut self, period: Duration) {
        self.generation += 1;
        self.period = Some(period);
    }

    /// Stop ticking; a no-op when already stopped
    pub fn stop(&mut self) {
        if self.period.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.period.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Repeating tick trigger following a [`TickSchedule`]
#[derive(Debug, Default)]
pub struct TickTimer {
    interval: Option<Interval>,
    generation: Option<u64>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the trigger if the schedule changed since the last sync.
    ///
    /// The first tick of a new trigger fires one full period from now.
    /// Returns true when the trigger was replaced or dropped.
    pub fn sync(&mut self, schedule: &TickSchedule) -> bool {
        if self.generation == Some(schedule.generation()) {
            return false;
        }
        self.generation = Some(schedule.generation());
        self.interval = schedule.period().map(|period| {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        true
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Wait for the next tick; never completes while stopped
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}
