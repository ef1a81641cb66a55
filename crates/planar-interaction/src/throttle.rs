//! Leading+trailing throttle gate driven by explicit timestamps.
//!
//! No timers: the gate is advanced by the event stream itself. The leading
//! call runs immediately; calls inside the interval are deferred, and the
//! first call after the interval elapses runs as the trailing edge with
//! the freshest data.

use std::time::Duration;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Default hover-pick throttle interval (~one 60 Hz frame).
pub const DEFAULT_HOVER_INTERVAL: Duration = Duration::from_millis(16);

/// Outcome of offering an event to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admit {
    /// Run now (leading edge, or trailing edge of a deferred burst).
    Run,
    /// Suppressed; a trailing run is owed.
    Deferred,
}

/// Leading+trailing throttle state.
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    interval: Duration,
    last_run: Option<Instant>,
    trailing_owed: bool,
}

impl ThrottleGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            trailing_owed: false,
        }
    }

    /// Offer an event at `now`. `Run` means the caller should do the work
    /// with this event's data; `Deferred` means skip it (a later event or
    /// an explicit [`flush`](Self::flush) will run the trailing edge).
    pub fn admit(&mut self, now: Instant) -> Admit {
        match self.last_run {
            Some(last) if now.duration_since(last) < self.interval => {
                self.trailing_owed = true;
                Admit::Deferred
            }
            _ => {
                self.last_run = Some(now);
                self.trailing_owed = false;
                Admit::Run
            }
        }
    }

    /// Run the owed trailing edge if the interval has elapsed. Returns
    /// true at most once per deferred burst.
    pub fn flush(&mut self, now: Instant) -> bool {
        if !self.trailing_owed {
            return false;
        }
        match self.last_run {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_run = Some(now);
                self.trailing_owed = false;
                true
            }
        }
    }

    /// Forget history; the next admit runs on the leading edge.
    pub fn reset(&mut self) {
        self.last_run = None;
        self.trailing_owed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(base: Instant, offset: u64) -> Instant {
        base + Duration::from_millis(offset)
    }

    #[test]
    fn test_leading_edge_runs_immediately() {
        let base = Instant::now();
        let mut gate = ThrottleGate::new(Duration::from_millis(16));
        assert_eq!(gate.admit(base), Admit::Run);
    }

    #[test]
    fn test_burst_is_deferred_then_trails() {
        let base = Instant::now();
        let mut gate = ThrottleGate::new(Duration::from_millis(16));
        assert_eq!(gate.admit(base), Admit::Run);
        assert_eq!(gate.admit(ms(base, 4)), Admit::Deferred);
        assert_eq!(gate.admit(ms(base, 8)), Admit::Deferred);
        // Next event past the interval runs as the trailing edge.
        assert_eq!(gate.admit(ms(base, 17)), Admit::Run);
    }

    #[test]
    fn test_flush_runs_owed_trailing_once() {
        let base = Instant::now();
        let mut gate = ThrottleGate::new(Duration::from_millis(16));
        gate.admit(base);
        gate.admit(ms(base, 5));
        assert!(!gate.flush(ms(base, 10)));
        assert!(gate.flush(ms(base, 20)));
        assert!(!gate.flush(ms(base, 40)));
    }

    #[test]
    fn test_flush_without_deferral_is_noop() {
        let base = Instant::now();
        let mut gate = ThrottleGate::new(Duration::from_millis(16));
        gate.admit(base);
        assert!(!gate.flush(ms(base, 100)));
    }

    #[test]
    fn test_reset_restores_leading_edge() {
        let base = Instant::now();
        let mut gate = ThrottleGate::new(Duration::from_millis(16));
        gate.admit(base);
        gate.admit(ms(base, 1));
        gate.reset();
        assert_eq!(gate.admit(ms(base, 2)), Admit::Run);
    }
}
