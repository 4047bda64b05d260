use std::thread;
use std::time::{Duration, Instant};

/// Caps a loop to a fixed number of ticks per second.
///
/// `wait` only sleeps for whatever is left of the interval since the previous
/// tick, so time spent drawing counts towards it.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Pacer {
    pub fn new(ticks_per_second: u16) -> Pacer {
        Pacer {
            interval: Duration::from_secs(1) / u32::from(ticks_per_second.max(1)),
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long a tick at `now` would still have to wait.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.last_tick = Some(Instant::now());
    }
}
