//! Cancel-and-reschedule timers.
//!
//! Used for the suggestion fetch debounce (each keystroke resets the timer,
//! so only the last edit within the window survives) and for the short
//! grace period before the suggestion list hides after the input loses
//! focus. At most one pending deadline exists per timer.

use std::time::{Duration, Instant};

/// A single-slot deferred action timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Schedule (or reschedule) the deadline, measured from now.
    pub fn poke(&mut self) {
        self.poke_at(Instant::now());
    }

    /// Schedule (or reschedule) the deadline, measured from `now`.
    /// Split out so tests can drive the timer with explicit instants.
    pub fn poke_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline once it has passed. Returns true at most once
    /// per scheduled deadline.
    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }

    pub fn fire_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_no_fire_before_deadline() {
        let mut timer = Debouncer::new(DELAY);
        let start = Instant::now();
        timer.poke_at(start);
        assert!(!timer.fire_at(start + Duration::from_millis(299)));
        assert!(timer.is_pending());
    }

    #[test]
    fn test_fires_once_after_deadline() {
        let mut timer = Debouncer::new(DELAY);
        let start = Instant::now();
        timer.poke_at(start);
        assert!(timer.fire_at(start + DELAY));
        // Consumed: no second fire without a new poke.
        assert!(!timer.fire_at(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_poke_resets_deadline() {
        // Three keystrokes inside the window collapse to one fire at the
        // last keystroke's deadline.
        let mut timer = Debouncer::new(DELAY);
        let start = Instant::now();
        timer.poke_at(start);
        timer.poke_at(start + Duration::from_millis(100));
        timer.poke_at(start + Duration::from_millis(200));

        assert!(!timer.fire_at(start + Duration::from_millis(400)));
        assert!(timer.fire_at(start + Duration::from_millis(500)));
        assert!(!timer.fire_at(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_cancel_drops_deadline() {
        let mut timer = Debouncer::new(DELAY);
        let start = Instant::now();
        timer.poke_at(start);
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.fire_at(start + Duration::from_secs(10)));
    }
}
