//! Timed effects: shield and speed boost
//!
//! Liveness is recomputed from `(now, started_at, duration)` rather than
//! trusted from the stored flag, so an effect expires correctly even if
//! nothing polled it in the meantime. No background task is involved.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// An "active until deadline" effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    active: bool,
    started_at: Duration,
    duration: Duration,
}

impl TimedEffect {
    pub fn new(duration: Duration) -> Self {
        Self {
            active: false,
            started_at: Duration::ZERO,
            duration,
        }
    }

    /// Start (or restart) the effect at `now`.
    pub fn activate(&mut self, now: Duration) {
        self.active = true;
        self.started_at = now;
    }

    /// Canonical liveness check: lazy expiry. Callers must use this, never
    /// a raw flag read.
    pub fn is_active(&self, now: Duration) -> bool {
        self.active && now.saturating_sub(self.started_at) < self.duration
    }

    /// Force the effect off.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// True exactly when the stored flag is stale: the effect was activated
    /// and its deadline has passed, but nothing cleared it yet.
    pub fn expired(&self, now: Duration) -> bool {
        self.active && !self.is_active(now)
    }

    /// Time left before expiry, `None` when inactive.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        if self.is_active(now) {
            Some(self.duration - now.saturating_sub(self.started_at))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn inactive_until_activated() {
        let effect = TimedEffect::new(secs(3));
        assert!(!effect.is_active(secs(0)));
        assert!(!effect.expired(secs(10)));
    }

    #[test]
    fn expires_lazily_without_polling() {
        let mut effect = TimedEffect::new(secs(3));
        effect.activate(secs(10));
        assert!(effect.is_active(secs(10)));
        assert!(effect.is_active(secs(12)));
        // Nothing polled between t=12 and t=20; liveness is still correct
        assert!(!effect.is_active(secs(20)));
        assert!(effect.expired(secs(20)));
    }

    #[test]
    fn deadline_is_exclusive() {
        let mut effect = TimedEffect::new(secs(3));
        effect.activate(secs(0));
        assert!(!effect.is_active(secs(3)));
    }

    #[test]
    fn reactivation_extends_the_deadline() {
        let mut effect = TimedEffect::new(secs(3));
        effect.activate(secs(0));
        effect.activate(secs(2));
        assert!(effect.is_active(secs(4)));
        assert!(!effect.is_active(secs(5)));
    }

    #[test]
    fn deactivate_wins_over_remaining_time() {
        let mut effect = TimedEffect::new(secs(3));
        effect.activate(secs(0));
        effect.deactivate();
        assert!(!effect.is_active(secs(1)));
        assert!(!effect.expired(secs(1)));
    }

    #[test]
    fn remaining_counts_down() {
        let mut effect = TimedEffect::new(secs(3));
        effect.activate(secs(10));
        assert_eq!(effect.remaining(secs(11)), Some(secs(2)));
        assert_eq!(effect.remaining(secs(14)), None);
    }
}
