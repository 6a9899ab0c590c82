//! Quiescence-window debouncing for free-text input.
//!
//! [`DebounceGate`] holds at most one pending value. Every call to
//! [`DebounceGate::schedule`] replaces the pending value and restarts the
//! window; the value is delivered exactly once, by [`DebounceGate::poll`] or
//! [`DebounceGate::fire_due`], after the window has elapsed with no further
//! call.
//!
//! The gate never owns a timer. The caller arms a host timer for the returned
//! deadline and polls when it wakes up. Zellij timers cannot be cancelled, so
//! wake-ups armed for superseded values simply find nothing due. Dropping the
//! gate (or calling [`DebounceGate::cancel`]) discards the pending value, so a
//! late wake-up after unmount has nothing to deliver.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use taskhistory::history::DebounceGate;
//!
//! let mut gate = DebounceGate::new(Duration::from_millis(500));
//! let t0 = Instant::now();
//!
//! gate.schedule("milk".to_string(), t0);
//! gate.schedule("milk eggs".to_string(), t0 + Duration::from_millis(200));
//!
//! assert_eq!(gate.poll(t0 + Duration::from_millis(600)), None);
//! assert_eq!(gate.poll(t0 + Duration::from_millis(700)), Some("milk eggs".to_string()));
//! assert_eq!(gate.poll(t0 + Duration::from_millis(900)), None);
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Single-slot debouncer keyed on a fixed quiescence window.
#[derive(Debug, Clone)]
pub struct DebounceGate<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> DebounceGate<T> {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Replaces any pending value and restarts the window.
    ///
    /// Returns the new deadline; the caller should wake the gate no earlier
    /// than that instant.
    pub fn schedule(&mut self, value: T, now: Instant) -> Instant {
        let deadline = now + self.window;
        if self.pending.is_some() {
            tracing::trace!("debounce window restarted");
        }
        self.pending = Some(Pending { value, deadline });
        deadline
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending.take().map(|pending| pending.value)
            }
            _ => None,
        }
    }

    /// Invokes `callback` with the pending value if it is due.
    ///
    /// Returns whether the callback ran. The callback runs at most once per
    /// scheduled value.
    pub fn fire_due<F>(&mut self, now: Instant, callback: F) -> bool
    where
        F: FnOnce(T),
    {
        self.poll(now).map(callback).is_some()
    }

    /// Time left until the pending value becomes due.
    ///
    /// `None` when nothing is pending; `Some(Duration::ZERO)` when it is due.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.deadline.saturating_duration_since(now))
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Discards the pending value without delivering it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn delivers_once_after_window() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(WINDOW);
        gate.schedule(1, t0);

        assert_eq!(gate.poll(t0 + ms(499)), None);
        assert_eq!(gate.poll(t0 + ms(500)), Some(1));
        assert_eq!(gate.poll(t0 + ms(2_000)), None);
    }

    #[test]
    fn superseding_call_restarts_window() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(WINDOW);
        gate.schedule("a", t0);
        let deadline = gate.schedule("ab", t0 + ms(300));

        assert_eq!(deadline, t0 + ms(800));
        assert_eq!(gate.poll(t0 + ms(500)), None);
        assert_eq!(gate.remaining(t0 + ms(500)), Some(ms(300)));
        assert_eq!(gate.poll(t0 + ms(800)), Some("ab"));
    }

    #[test]
    fn cancelled_value_is_never_delivered() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(WINDOW);
        gate.schedule("gone", t0);

        assert_eq!(gate.cancel(), Some("gone"));
        let mut fired = false;
        assert!(!gate.fire_due(t0 + ms(10_000), |_| fired = true));
        assert!(!fired);
        assert_eq!(gate.remaining(t0), None);
    }

    #[test]
    fn fire_due_runs_callback_with_latest_value() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(WINDOW);
        gate.schedule(String::from("milk"), t0);
        gate.schedule(String::from("milk eggs"), t0 + ms(200));

        let mut seen = Vec::new();
        assert!(gate.fire_due(t0 + ms(700), |value| seen.push(value)));
        assert!(!gate.fire_due(t0 + ms(1_400), |value| seen.push(value)));
        assert_eq!(seen, vec![String::from("milk eggs")]);
    }

    proptest! {
        #[test]
        fn bursts_shorter_than_window_deliver_only_last_value(
            gaps in prop::collection::vec(0u64..500, 1..20),
            probe_step in 1u64..100,
        ) {
            let t0 = Instant::now();
            let mut gate = DebounceGate::new(WINDOW);
            let mut now = t0;
            let mut delivered = Vec::new();

            for (index, gap) in gaps.iter().enumerate() {
                now += ms(*gap);
                // wake-ups between keystrokes must never find anything due
                if let Some(value) = gate.poll(now) {
                    delivered.push(value);
                }
                gate.schedule(index, now);
            }

            let last = gaps.len() - 1;
            let mut probe = now;
            while probe <= now + WINDOW + ms(probe_step) {
                if let Some(value) = gate.poll(probe) {
                    delivered.push(value);
                }
                probe += ms(probe_step);
            }

            prop_assert_eq!(delivered, vec![last]);
        }
    }
}
