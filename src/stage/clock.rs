//! # Tick Pacing
//!
//! Clocks block until the current tick's time budget is used up.

use std::time::{Duration, Instant};

/// Paces the dispatch loop.
pub trait Clock {
    /// Blocks until `1 / target_rate` seconds have passed since the previous
    /// tick and returns the milliseconds actually elapsed.
    fn tick(&mut self, target_rate: u32) -> u64;
}

/// Wall-clock pacing that sleeps out the rest of each tick.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn tick(&mut self, target_rate: u32) -> u64 {
        let budget = Duration::from_secs(1) / target_rate.max(1);
        let spent = self.last_tick.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        elapsed.as_millis() as u64
    }
}
