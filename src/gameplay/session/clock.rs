/// Seconds survived, carried across pause/continue cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurvivalClock {
    accumulated_secs: u64,
    last_secs: u64,
    start_ms: u64,
}

impl SurvivalClock {
    pub fn started_at(now_ms: u64) -> Self {
        Self {
            start_ms: now_ms,
            ..Default::default()
        }
    }

    /// Current total; also becomes the value shown while frozen.
    pub fn sample(&mut self, now_ms: u64) -> u64 {
        let running = now_ms.saturating_sub(self.start_ms) / 1000;
        self.last_secs = self.accumulated_secs + running;
        self.last_secs
    }

    /// Fold the displayed time into the carried total before a pause.
    pub fn bank(&mut self) {
        self.accumulated_secs = self.last_secs;
    }

    pub fn resume(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
    }

    pub fn reset(&mut self, now_ms: u64) {
        *self = Self::started_at(now_ms);
    }

    pub fn last_secs(&self) -> u64 {
        self.last_secs
    }

    pub fn accumulated_secs(&self) -> u64 {
        self.accumulated_secs
    }
}
