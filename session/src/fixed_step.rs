//! Fixed-rate tick scheduling
//!
//! Turns wall-clock frame times into a whole number of simulation ticks so
//! the game runs at its tuned rate whatever the display refresh rate is.

/// Most ticks run for a single frame; time beyond that is dropped
pub const MAX_TICKS_PER_FRAME: u32 = 8;

#[derive(Debug, Clone)]
pub struct FixedStep {
    step_ms: f64,
    last_ms: u64,
    accumulator_ms: f64,
}

impl FixedStep {
    pub fn new(tick_rate_hz: u32, now_ms: u64) -> Self {
        Self {
            step_ms: 1000.0 / f64::from(tick_rate_hz.max(1)),
            last_ms: now_ms,
            accumulator_ms: 0.0,
        }
    }

    /// Restart timing from `now_ms`, e.g. after a pause
    pub fn reset(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
        self.accumulator_ms = 0.0;
    }

    /// Ticks owed for the time since the previous call
    pub fn advance(&mut self, now_ms: u64) -> u32 {
        let frame_ms = now_ms.saturating_sub(self.last_ms);
        self.last_ms = now_ms;
        self.accumulator_ms += frame_ms as f64;

        let mut ticks = 0;
        while self.accumulator_ms >= self.step_ms {
            self.accumulator_ms -= self.step_ms;
            ticks += 1;

            if ticks == MAX_TICKS_PER_FRAME {
                // Stalled (tab in background); don't try to catch up
                self.accumulator_ms = 0.0;
                break;
            }
        }
        ticks
    }
}
