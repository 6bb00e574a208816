//! Drop timer - the gravity schedule
//!
//! A cancellable repeating timer measured against an external clock. Each
//! firing restarts the period from the poll that observed it, so a late
//! poll produces one tick, never a burst of catch-up ticks. Cancelling
//! forgets the reference point entirely; scheduling again starts a fresh
//! period.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct DropTimer {
    interval: Duration,
    /// Start of the current period, `None` while cancelled
    reference: Option<Instant>,
}

impl DropTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            reference: None,
        }
    }

    /// Start a fresh period at `now`
    pub fn schedule(&mut self, now: Instant, interval: Duration) {
        self.interval = interval;
        self.reference = Some(now);
    }

    pub fn cancel(&mut self) {
        self.reference = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.reference.is_some()
    }

    /// Change the period; the current period is re-measured against it.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick is due, if scheduled
    pub fn deadline(&self) -> Option<Instant> {
        self.reference.map(|r| r + self.interval)
    }

    /// Returns true (once) if a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.reference = Some(now);
                true
            }
            _ => false,
        }
    }
}

impl Default for DropTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(drop_tetris_types::BASE_DROP_MS as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_unscheduled_timer_never_fires() {
        let mut timer = DropTimer::default();
        let now = Instant::now();
        assert!(!timer.poll(now + ms(10_000)));
        assert!(!timer.is_scheduled());
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn test_fires_after_interval() {
        let t0 = Instant::now();
        let mut timer = DropTimer::default();
        timer.schedule(t0, ms(800));

        assert!(!timer.poll(t0 + ms(799)));
        assert!(timer.poll(t0 + ms(800)));
        // Next period starts at the firing poll.
        assert_eq!(timer.deadline(), Some(t0 + ms(1600)));
    }

    #[test]
    fn test_late_poll_fires_once() {
        let t0 = Instant::now();
        let mut timer = DropTimer::default();
        timer.schedule(t0, ms(100));

        let late = t0 + ms(1000);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.deadline(), Some(late + ms(100)));
    }

    #[test]
    fn test_cancel_then_reschedule_starts_fresh() {
        let t0 = Instant::now();
        let mut timer = DropTimer::default();
        timer.schedule(t0, ms(800));
        timer.cancel();
        assert!(!timer.is_scheduled());
        assert!(!timer.poll(t0 + ms(900)));

        let t1 = t0 + ms(900);
        timer.schedule(t1, ms(800));
        assert!(!timer.poll(t1 + ms(500)));
        assert!(timer.poll(t1 + ms(800)));
    }

    #[test]
    fn test_set_interval_applies_to_current_period() {
        let t0 = Instant::now();
        let mut timer = DropTimer::default();
        timer.schedule(t0, ms(800));
        timer.set_interval(ms(750));
        assert_eq!(timer.interval(), ms(750));
        assert_eq!(timer.deadline(), Some(t0 + ms(750)));
        assert!(timer.poll(t0 + ms(750)));
    }
}
