//! The scheduler seen from the report pipeline.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Read access to simulated time plus the two control requests reports may issue.
pub trait SimulationClock: Send + Sync {
    /// Current simulated time in ticks.
    fn current_time(&self) -> u64;

    /// Reports whether the scheduler is executing processes.
    fn is_running(&self) -> bool;

    /// Delta-cycle count at the current time.
    fn delta_count(&self) -> u64;

    /// Asks the scheduler to stop at the end of the current delta cycle.
    fn request_stop(&self);

    /// Terminates the process immediately.
    fn abort(&self) -> ! {
        std::process::abort()
    }
}

/// Clock of a model that is not being simulated: time zero, never running.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleClock;

impl SimulationClock for IdleClock {
    fn current_time(&self) -> u64 {
        0
    }

    fn is_running(&self) -> bool {
        false
    }

    fn delta_count(&self) -> u64 {
        0
    }

    fn request_stop(&self) {}
}

/// Clock driven by hand, for co-simulation bridges and tests.
///
/// `request_stop` only records the request; the driver decides when the
/// simulation actually stops.
///
/// # Examples
///
/// ```
/// use logging::{ManualClock, SimulationClock};
///
/// let clock = ManualClock::new();
/// clock.set_running(true);
/// clock.advance(1_500);
/// clock.request_stop();
///
/// assert_eq!(clock.current_time(), 1_500);
/// assert_eq!(clock.stop_requests(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    time: AtomicU64,
    delta: AtomicU64,
    running: AtomicBool,
    stop_requests: AtomicUsize,
}

impl ManualClock {
    /// Stopped clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time.
    pub fn set_time(&self, ticks: u64) {
        self.time.store(ticks, Ordering::SeqCst);
    }

    /// Moves time forward by `ticks` and resets the delta count.
    pub fn advance(&self, ticks: u64) {
        self.time.fetch_add(ticks, Ordering::SeqCst);
        self.delta.store(0, Ordering::SeqCst);
    }

    /// Sets the delta-cycle count.
    pub fn set_delta(&self, delta: u64) {
        self.delta.store(delta, Ordering::SeqCst);
    }

    /// Marks the scheduler as running or stopped.
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    /// Number of stop requests received.
    #[must_use]
    pub fn stop_requests(&self) -> usize {
        self.stop_requests.load(Ordering::SeqCst)
    }
}

impl SimulationClock for ManualClock {
    fn current_time(&self) -> u64 {
        self.time.load(Ordering::SeqCst)
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn delta_count(&self) -> u64 {
        self.delta.load(Ordering::SeqCst)
    }

    fn request_stop(&self) {
        self.stop_requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_clock_is_stopped_at_zero() {
        let clock = IdleClock;
        assert_eq!(clock.current_time(), 0);
        assert!(!clock.is_running());
        clock.request_stop();
        assert_eq!(clock.delta_count(), 0);
    }

    #[test]
    fn advance_resets_delta() {
        let clock = ManualClock::new();
        clock.set_delta(3);
        clock.advance(10);
        clock.advance(5);
        assert_eq!(clock.current_time(), 15);
        assert_eq!(clock.delta_count(), 0);
        clock.set_time(2);
        assert_eq!(clock.current_time(), 2);
    }
}
