//! Frame pacing and cancellation.
//!
//! The frame driver re-arms a single wait after every tick instead of
//! registering a recurring timer, so stopping is just a flag checked
//! before the next tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::RenderResult;

/// Cloneable flag that ends the animation loop
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Waits between ticks
pub trait Scheduler {
    /// Block until the next tick is due; may trigger `stop`
    fn wait(&mut self, delay: Duration, stop: &StopHandle) -> RenderResult<()>;
}

/// Scheduler backed by `std::thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepScheduler;

impl Scheduler for SleepScheduler {
    fn wait(&mut self, delay: Duration, _stop: &StopHandle) -> RenderResult<()> {
        std::thread::sleep(delay);
        Ok(())
    }
}

/// Scheduler that never sleeps and stops the loop after a fixed number of waits
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    stop_after: Option<usize>,
    pub delays: Vec<Duration>,
}

impl ManualScheduler {
    /// Trigger the stop handle on the `waits`-th wait
    pub fn stop_after(waits: usize) -> Self {
        Self {
            stop_after: Some(waits),
            delays: Vec::new(),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }
}

impl Scheduler for ManualScheduler {
    fn wait(&mut self, delay: Duration, stop: &StopHandle) -> RenderResult<()> {
        self.delays.push(delay);
        if self.stop_after.is_some_and(|limit| self.delays.len() >= limit) {
            stop.stop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_handle_is_shared() {
        let handle = StopHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_stopped());

        clone.stop();
        assert!(handle.is_stopped());
    }

    #[test]
    fn test_manual_scheduler_stops() {
        let stop = StopHandle::new();
        let mut scheduler = ManualScheduler::stop_after(2);

        scheduler.wait(Duration::from_millis(16), &stop).unwrap();
        assert!(!stop.is_stopped());
        scheduler.wait(Duration::from_millis(16), &stop).unwrap();
        assert!(stop.is_stopped());
        assert_eq!(scheduler.delays.len(), 2);
    }

    #[test]
    fn test_sleep_scheduler_sleeps() {
        let stop = StopHandle::new();
        let start = std::time::Instant::now();
        SleepScheduler.wait(Duration::from_millis(5), &stop).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
