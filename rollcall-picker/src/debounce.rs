//! Debounce coordinator.
//!
//! Coalesces a burst of `schedule` calls into a single deferred action. Each
//! call replaces whatever was pending and re-arms the deadline, so the action
//! that finally runs is the last one scheduled, at `last_call + delay`.
//!
//! The coordinator does not spawn anything. The owner awaits [`Debouncer::fired`]
//! (typically as one arm of a `tokio::select!`) and runs the returned action on
//! its own task. Dropping the coordinator drops the pending action unexecuted.

use std::future;
use std::time::Duration;
use tokio::time::{self, Instant};

#[derive(Debug)]
struct Pending<A> {
    action: A,
    due: Instant,
}

/// One-shot, last-call-wins timer holding a deferred action of type `A`.
#[derive(Debug)]
pub struct Debouncer<A> {
    pending: Option<Pending<A>>,
}

impl<A> Default for Debouncer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Debouncer<A> {
    /// Creates an idle coordinator.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Replaces any pending action with `action`, due `delay` from now.
    ///
    /// Returns true if a pending action was superseded.
    pub fn schedule(&mut self, action: A, delay: Duration) -> bool {
        self.schedule_at(action, Instant::now(), delay)
    }

    /// Same as [`Debouncer::schedule`] with an explicit clock reading.
    pub fn schedule_at(&mut self, action: A, now: Instant, delay: Duration) -> bool {
        self.pending
            .replace(Pending {
                action,
                due: now + delay,
            })
            .is_some()
    }

    /// Deadline of the pending action, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Whether an action is armed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending action if its deadline is at or before `now`.
    pub fn poll_due(&mut self, now: Instant) -> Option<A> {
        match &self.pending {
            Some(p) if p.due <= now => self.pending.take().map(|p| p.action),
            _ => None,
        }
    }

    /// Waits until the pending action is due and returns it.
    ///
    /// Never resolves while nothing is scheduled. Cancel-safe: the action is
    /// only taken after the sleep completes, with no await point in between,
    /// so dropping this future (e.g. because a newer `schedule` call won the
    /// select) leaves the coordinator intact.
    pub async fn fired(&mut self) -> A {
        loop {
            let Some(due) = self.deadline() else {
                return future::pending().await;
            };
            time::sleep_until(due).await;
            if let Some(action) = self.poll_due(Instant::now()) {
                return action;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_has_no_deadline() {
        let d: Debouncer<u8> = Debouncer::new();
        assert!(!d.is_pending());
        assert!(d.deadline().is_none());
    }

    #[test]
    fn poll_due_respects_deadline() {
        let start = Instant::now();
        let mut d = Debouncer::new();
        d.schedule_at("a", start, Duration::from_millis(300));

        assert_eq!(d.poll_due(start + Duration::from_millis(299)), None);
        assert_eq!(d.poll_due(start + Duration::from_millis(300)), Some("a"));
        assert!(!d.is_pending());
        assert_eq!(d.poll_due(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn reschedule_replaces_action_and_deadline() {
        let start = Instant::now();
        let mut d = Debouncer::new();
        assert!(!d.schedule_at("jo", start, Duration::from_millis(300)));
        assert!(d.schedule_at(
            "john",
            start + Duration::from_millis(100),
            Duration::from_millis(300)
        ));

        assert_eq!(d.deadline(), Some(start + Duration::from_millis(400)));
        assert_eq!(d.poll_due(start + Duration::from_millis(300)), None);
        assert_eq!(d.poll_due(start + Duration::from_millis(400)), Some("john"));
    }
}
