//! Fixed-interval tick scheduling
//!
//! [`TickClock`] turns wall-clock time into whole engine ticks. It only
//! accumulates time while the engine is running, so a stopped or finished
//! match never receives a late tick and a resumed one never bursts.

use std::time::Duration;

use crate::consts::{MAX_CATCHUP_TICKS, TICK_INTERVAL_MS};
use crate::engine::GameEngine;

/// Fixed-step accumulator bound to the engine's running flag
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    accumulator: Duration,
    max_catchup: u32,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_INTERVAL_MS as u64))
    }
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            max_catchup: MAX_CATCHUP_TICKS,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next tick is due
    pub fn until_next_tick(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }

    /// Forget any partially elapsed interval
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Account for `elapsed` time and run the ticks that are due.
    ///
    /// Returns the number of ticks run. Stops early when a tick ends the match.
    pub fn advance(&mut self, engine: &mut GameEngine, elapsed: Duration) -> u32 {
        if !engine.is_running() {
            self.reset();
            return 0;
        }

        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.interval && ticks < self.max_catchup {
            engine.tick();
            self.accumulator -= self.interval;
            ticks += 1;

            if !engine.is_running() {
                self.reset();
                return ticks;
            }
        }

        if self.accumulator >= self.interval {
            log::debug!(
                "Clock fell behind by {:?}, dropping missed ticks",
                self.accumulator
            );
            self.reset();
        }

        ticks
    }
}
