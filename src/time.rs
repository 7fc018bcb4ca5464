//! Frame clock: turns variable `draw_web()` frame times into whole ticks.
//!
//! The fishing game itself is driven only by player actions; ticks advance
//! cosmetic state (floating text, flashes, pond animation).

/// Ticks per real-time second.
pub const TICKS_PER_SEC: u32 = 10;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds seen but not yet turned into ticks.
    accumulator: f64,
    pub total_ticks: u64,
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a `performance.now()` timestamp; returns ticks elapsed since the
    /// previous call. The first call only sets the baseline.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        // A backgrounded tab can report a huge gap; cap it at half a second.
        let delta = self
            .last_timestamp
            .map_or(0.0, |prev| (now_ms - prev).clamp(0.0, 500.0));
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
