use std::time::{Duration, Instant};

/// Poll interval for the event loop in milliseconds
///
/// The loop wakes this often to stay responsive; the logical tick rate of
/// the engine is still exactly one second.
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get the event-loop poll duration
pub fn poll_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Scheduler handle owned by the timer engine
///
/// Tracks the wall-clock baseline for the shared one-second tick. The engine
/// starts it when the first timer enters Running and stops it once none
/// remain Running, so an idle process does no tick work. Starting an active
/// ticker is a no-op; there is never more than one baseline.
#[derive(Debug, Default)]
pub struct Ticker {
    baseline: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self { baseline: None }
    }

    /// Start ticking from `now`. No-op when already active.
    pub fn start(&mut self, now: Instant) {
        if self.baseline.is_none() {
            self.baseline = Some(now);
        }
    }

    /// Stop ticking and drop the baseline.
    pub fn stop(&mut self) {
        self.baseline = None;
    }

    pub fn is_active(&self) -> bool {
        self.baseline.is_some()
    }

    /// Number of whole seconds elapsed since the last poll
    ///
    /// Advances the baseline by exactly the seconds returned, keeping the
    /// sub-second remainder so tick cadence does not drift with poll jitter.
    /// Returns 0 when inactive.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(baseline) = self.baseline else {
            return 0;
        };

        let elapsed = now.saturating_duration_since(baseline);
        let whole_seconds = elapsed.as_secs() as u32;
        if whole_seconds > 0 {
            self.baseline = Some(baseline + Duration::from_secs(whole_seconds as u64));
        }
        whole_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_duration() {
        assert_eq!(poll_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_inactive_ticker_yields_nothing() {
        let mut ticker = Ticker::new();
        assert!(!ticker.is_active());
        assert_eq!(ticker.poll(Instant::now()), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut ticker = Ticker::new();
        let t0 = Instant::now();
        ticker.start(t0);
        // A later start must not move the baseline forward
        ticker.start(t0 + Duration::from_secs(5));
        assert_eq!(ticker.poll(t0 + Duration::from_secs(2)), 2);
    }

    #[test]
    fn test_poll_yields_whole_seconds() {
        let mut ticker = Ticker::new();
        let t0 = Instant::now();
        ticker.start(t0);

        assert_eq!(ticker.poll(t0 + Duration::from_millis(900)), 0);
        assert_eq!(ticker.poll(t0 + Duration::from_millis(1100)), 1);
        // Remainder of 100ms is kept, so the next second lands at 2100ms
        assert_eq!(ticker.poll(t0 + Duration::from_millis(2050)), 0);
        assert_eq!(ticker.poll(t0 + Duration::from_millis(2100)), 1);
    }

    #[test]
    fn test_poll_replays_missed_seconds() {
        let mut ticker = Ticker::new();
        let t0 = Instant::now();
        ticker.start(t0);
        assert_eq!(ticker.poll(t0 + Duration::from_secs(3)), 3);
        assert_eq!(ticker.poll(t0 + Duration::from_secs(3)), 0);
    }

    #[test]
    fn test_stop_clears_baseline() {
        let mut ticker = Ticker::new();
        let t0 = Instant::now();
        ticker.start(t0);
        ticker.stop();
        assert!(!ticker.is_active());
        assert_eq!(ticker.poll(t0 + Duration::from_secs(10)), 0);
    }
}
