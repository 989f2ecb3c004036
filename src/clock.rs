use std::time::Duration;

/// Most steps released by a single `advance` call.
///
/// A long stall (suspended terminal, debugger) would otherwise replay dozens
/// of ticks at once.
pub const MAX_CATCH_UP_STEPS: u32 = 3;

/// Turns elapsed frame time into whole simulation steps.
///
/// Time accumulates across frames so the game advances exactly once per
/// elapsed interval regardless of how often the loop redraws.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickClock {
    accumulated: Duration,
}

impl TickClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` and returns how many steps of `interval` are due.
    pub fn advance(&mut self, elapsed: Duration, interval: Duration) -> u32 {
        if interval.is_zero() {
            return 0;
        }

        self.accumulated += elapsed;
        let mut steps = 0;
        while self.accumulated >= interval {
            self.accumulated -= interval;
            steps += 1;
            if steps == MAX_CATCH_UP_STEPS {
                self.accumulated = Duration::ZERO;
                break;
            }
        }

        steps
    }

    /// Drops leftover time, e.g. when leaving pause.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
