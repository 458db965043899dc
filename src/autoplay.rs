//! Auto-advance clock.
//!
//! A cancellable repeating timer: arming spawns a background thread that
//! bumps an atomic tick counter once per interval; the event loop drains
//! the counter and applies the advances on its own thread. Disarming (or
//! dropping the clock) clears the running flag and the thread exits on its
//! next wake-up.
//!
//! The controller holds at most one clock. Pausing drops the clock rather
//! than suspending it, so resuming always restarts the full interval.
//!
//! # Example
//!
//! ```ignore
//! use deckhand::autoplay::AutoClock;
//! use std::time::Duration;
//!
//! let clock = AutoClock::arm(Duration::from_millis(5000));
//! // ... event loop ...
//! let pending = clock.take_ticks();
//! clock.disarm();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default interval between auto-advance ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

// =============================================================================
// AUTO CLOCK
// =============================================================================

/// A live repeating timer. Exists iff the deck is playing and not paused.
pub struct AutoClock {
    ticks: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AutoClock {
    /// Arm a clock with the given interval.
    ///
    /// Intervals shorter than 1 ms are clamped up to keep the thread from
    /// spinning.
    pub fn arm(interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        let ticks = Arc::new(AtomicU64::new(0));
        let running = Arc::new(AtomicBool::new(true));

        let thread_ticks = ticks.clone();
        let thread_running = running.clone();
        let handle = thread::spawn(move || {
            while thread_running.load(Ordering::SeqCst) {
                thread::sleep(interval);
                if thread_running.load(Ordering::SeqCst) {
                    thread_ticks.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        Self {
            ticks,
            running,
            handle: Some(handle),
        }
    }

    /// Drain pending ticks. Returns how many intervals elapsed since the
    /// last drain.
    pub fn take_ticks(&self) -> u64 {
        self.ticks.swap(0, Ordering::SeqCst)
    }

    /// Whether the timer thread is still live.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the clock. The thread exits on its next wake-up; we do not
    /// block waiting for it.
    pub fn disarm(self) {
        // Drop does the work.
    }
}

impl Drop for AutoClock {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        // Not joined: sleeping out the remaining interval would stall the
        // event loop.
        self.handle.take();
    }
}

// =============================================================================
// TESTS
// =============================================================================
