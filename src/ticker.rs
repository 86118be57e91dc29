use std::time::{Duration, Instant};

/// Default event poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// How often running stopwatches are redrawn
pub const TIMER_REFRESH: Duration = Duration::from_secs(1);

/// How often the greeting and date line are refreshed
pub const CLOCK_REFRESH: Duration = Duration::from_secs(60);

/// Get the event poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Periodic refreshes. Both only trigger read-only queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    TimerRefresh,
    ClockRefresh,
}

/// Turns the poll loop's wakeups into timer and clock ticks
#[derive(Debug)]
pub struct Ticker {
    last_timer: Instant,
    last_clock: Instant,
}

impl Ticker {
    pub fn new(start: Instant) -> Self {
        Self {
            last_timer: start,
            last_clock: start,
        }
    }

    /// Ticks that are due at `now`. A late poll yields each kind once, not a backlog.
    pub fn poll(&mut self, now: Instant) -> Vec<Tick> {
        let mut due = Vec::new();
        if now.duration_since(self.last_timer) >= TIMER_REFRESH {
            self.last_timer = now;
            due.push(Tick::TimerRefresh);
        }
        if now.duration_since(self.last_clock) >= CLOCK_REFRESH {
            self.last_clock = now;
            due.push(Tick::ClockRefresh);
        }
        due
    }
}
