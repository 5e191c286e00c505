//! Cancellable handle for the repeating game tick.
//!
//! The session never holds a live timer itself. It holds a [`TickHandle`]
//! describing the timer that should exist, and the UI turns the active
//! handle into a running stream. Re-arming issues a handle with a new
//! generation, which replaces the old stream. Ticks stamped with an old
//! generation are dropped by [`TickScheduler::is_current`].
use std::time::Duration;

use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle {
    generation: u64,
    interval_ms: u64,
}

impl TickHandle {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Clone, Debug, Default)]
pub struct TickScheduler {
    active: Option<TickHandle>,
    issued: u64,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the active handle, if any, and arms a new one.
    pub fn start(&mut self, interval_ms: u64) -> TickHandle {
        self.cancel();
        self.issued += 1;
        let handle = TickHandle {
            generation: self.issued,
            interval_ms,
        };
        debug!("Armed tick {} every {interval_ms}ms", handle.generation);
        self.active = Some(handle);
        handle
    }

    pub fn cancel(&mut self) -> Option<TickHandle> {
        let old = self.active.take();
        if let Some(handle) = &old {
            debug!("Cancelled tick {}", handle.generation);
        }
        old
    }

    #[must_use]
    pub fn active(&self) -> Option<TickHandle> {
        self.active
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.active.is_some_and(|h| h.generation == generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_replaces_handle() {
        let mut scheduler = TickScheduler::new();
        let first = scheduler.start(150);
        let second = scheduler.start(145);
        assert_ne!(first.generation(), second.generation());
        assert!(!scheduler.is_current(first.generation()));
        assert!(scheduler.is_current(second.generation()));
        assert_eq!(scheduler.active().map(|h| h.interval()), Some(Duration::from_millis(145)));
    }

    #[test]
    fn test_cancel_clears_handle() {
        let mut scheduler = TickScheduler::new();
        let handle = scheduler.start(100);
        assert_eq!(scheduler.cancel(), Some(handle));
        assert!(scheduler.active().is_none());
        assert!(!scheduler.is_current(handle.generation()));
        assert_eq!(scheduler.cancel(), None);
    }
}
