//! Fixed-interval cooperative timer.
//!
//! A `Ticker` never sleeps or spawns anything. The owner polls it from the
//! frame loop with the current `Instant` and receives the number of interval
//! boundaries crossed since the previous poll. Stopping the ticker is the
//! cancellation: a stopped ticker reports no further ticks until restarted.

use std::time::{Duration, Instant};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create a stopped ticker. Intervals below 1ms are raised to 1ms.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)start the ticker; the first tick falls one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of ticks that fell due up to `now`. Advances the deadline past
    /// every reported tick.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(next) = self.next_due else {
            return 0;
        };
        if now < next {
            return 0;
        }

        let behind = now.duration_since(next).as_nanos();
        let steps = behind / self.interval.as_nanos() + 1;
        let steps = u32::try_from(steps).unwrap_or(u32::MAX);
        self.next_due = Some(next + self.interval * steps);
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_stopped_ticker_reports_nothing() {
        let mut ticker = Ticker::new(ms(10));
        assert!(!ticker.is_running());
        assert_eq!(ticker.due(Instant::now() + ms(1000)), 0);
    }

    #[test]
    fn test_first_tick_after_one_interval() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(ms(300));
        ticker.start(t0);
        assert_eq!(ticker.due(t0 + ms(299)), 0);
        assert_eq!(ticker.due(t0 + ms(300)), 1);
        assert_eq!(ticker.due(t0 + ms(300)), 0);
    }

    #[test]
    fn test_catches_up_on_missed_ticks() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(ms(100));
        ticker.start(t0);
        assert_eq!(ticker.due(t0 + ms(350)), 3);
        assert_eq!(ticker.due(t0 + ms(399)), 0);
        assert_eq!(ticker.due(t0 + ms(400)), 1);
    }

    #[test]
    fn test_stop_cancels_pending_ticks() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(ms(100));
        ticker.start(t0);
        ticker.stop();
        assert_eq!(ticker.due(t0 + ms(500)), 0);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let ticker = Ticker::new(Duration::ZERO);
        assert_eq!(ticker.interval(), ms(1));
    }
}
