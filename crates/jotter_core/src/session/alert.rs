//! Transient validation alerts and their scheduled dismissal.
//!
//! # Responsibility
//! - Hold the messages produced by the latest failed validation.
//! - Expire them after a fixed display duration.
//!
//! # Invariants
//! - At most one alert is current; raising a new one supersedes the old.
//! - A dismissal only applies to the generation it was scheduled for, so a
//!   stale dismissal never clears a newer alert.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Time source for alert expiry.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Validation messages shown until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    messages: Vec<String>,
    expires_at: Instant,
    generation: u64,
}

impl Alert {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Token identifying this alert's scheduled dismissal.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Slot holding the current alert and its dismissal schedule.
#[derive(Debug)]
pub(crate) struct AlertSlot {
    current: Option<Alert>,
    next_generation: u64,
    display_for: Duration,
}

impl AlertSlot {
    pub(crate) fn new(display_for: Duration) -> Self {
        Self {
            current: None,
            next_generation: 1,
            display_for,
        }
    }

    /// Replaces any current alert. Returns the new generation.
    pub(crate) fn raise(&mut self, messages: Vec<String>, now: Instant) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.current = Some(Alert {
            messages,
            expires_at: now + self.display_for,
            generation,
        });
        generation
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
    }

    /// Returns the alert if it is still within its display window.
    pub(crate) fn visible(&self, now: Instant) -> Option<&Alert> {
        self.current.as_ref().filter(|alert| !alert.is_expired(now))
    }

    /// Drops the current alert once its display window has elapsed.
    pub(crate) fn dismiss_expired(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|alert| alert.is_expired(now)) {
            self.current = None;
            return true;
        }
        false
    }

    /// Runs a dismissal scheduled for `generation`; stale tokens are no-ops.
    pub(crate) fn dismiss(&mut self, generation: u64) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|alert| alert.generation == generation)
        {
            self.current = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{AlertSlot, Clock, ManualClock};
    use std::time::Duration;

    #[test]
    fn alert_expires_after_display_window() {
        let clock = ManualClock::new();
        let mut slot = AlertSlot::new(Duration::from_secs(3));
        slot.raise(vec!["Title is required.".to_string()], clock.now());

        clock.advance(Duration::from_millis(2_999));
        assert!(!slot.dismiss_expired(clock.now()));
        assert!(slot.visible(clock.now()).is_some());

        clock.advance(Duration::from_millis(1));
        assert!(slot.visible(clock.now()).is_none());
        assert!(slot.dismiss_expired(clock.now()));
    }

    #[test]
    fn newer_alert_cancels_stale_dismissal() {
        let clock = ManualClock::new();
        let mut slot = AlertSlot::new(Duration::from_secs(3));
        let first = slot.raise(vec!["Title is required.".to_string()], clock.now());
        clock.advance(Duration::from_secs(2));
        let second = slot.raise(vec!["Content is required.".to_string()], clock.now());

        assert!(!slot.dismiss(first));
        clock.advance(Duration::from_secs(2));
        let alert = slot.visible(clock.now()).expect("second alert still visible");
        assert_eq!(alert.generation(), second);
        assert!(slot.dismiss(second));
        assert!(slot.visible(clock.now()).is_none());
    }
}
