/// Encounter scheduler — the countdown that decides when the next random
/// encounter begins.

use std::time::Duration;

use crate::core::config::CountdownRange;
use crate::core::random::RandomSource;

/// Owns the exploration countdown.
///
/// The scheduler only counts; it has no idea whether an encounter is running.
/// Its owner stops calling `tick` during battle and calls `rearm` exactly once
/// each time exploration resumes.
#[derive(Debug, Clone)]
pub struct EncounterScheduler {
    range: CountdownRange,
    remaining: Option<Duration>,
}

impl EncounterScheduler {
    /// A disarmed scheduler. Call `rearm` before the first tick.
    pub fn new(range: CountdownRange) -> Self {
        Self {
            range,
            remaining: None,
        }
    }

    /// Draw a fresh countdown from the configured range.
    pub fn rearm(&mut self, rng: &mut dyn RandomSource) -> Duration {
        let ms = rng.range_inclusive(self.range.min_ms, self.range.max_ms);
        let countdown = Duration::from_millis(ms);
        self.remaining = Some(countdown);
        countdown
    }

    /// Count down by `delta`. Returns true exactly once, on the tick where
    /// the countdown reaches zero; the scheduler is spent afterwards.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };

        let remaining = remaining.saturating_sub(delta);
        if remaining.is_zero() {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(remaining);
            false
        }
    }

    /// Time left until the next encounter, or `None` when spent.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }
}
