//! Shared fixtures for the TickGuard integration test suite.
//!
//! The clock tests need real concurrency: a background thread standing in
//! for the timer interrupt while the foreground thread reads and delays.
//! [`BackgroundTicker`] provides that thread with deterministic shutdown.

#![deny(rust_2018_idioms)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::print_stdout)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use tickguard_clock::prelude::*;

/// Drives a shared [`SoftwareClock`] from a background thread. Stops and
/// joins on drop.
///
/// [`spawn`](Self::spawn) advances one full timer period plus interrupt per
/// wakeup; [`spawn_per_count`](Self::spawn_per_count) advances one sub-tick
/// count per wakeup.
pub struct BackgroundTicker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundTicker {
    /// Spawn a ticker firing roughly every `interval` of wall time.
    ///
    /// Simulated time runs at `1 ms` per wakeup regardless of `interval`,
    /// so a short interval fast-forwards the simulation relative to the
    /// wall clock.
    pub fn spawn(clock: Arc<SoftwareClock<SimTimer>>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            while !thread_stop.load(Ordering::Relaxed) {
                clock.timer().advance_counts(clock.timer().counts_per_tick());
                // A masked tick stays pending and fires at unmask; waiting
                // here keeps the counter from wrapping twice against one
                // serviced tick.
                while !clock.timer().tick_irq_enabled() {
                    std::hint::spin_loop();
                }
                clock.on_tick();
                std::thread::sleep(interval);
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Spawn a ticker advancing one sub-tick count per wakeup, servicing
    /// the tick interrupt whenever a count wraps the counter.
    ///
    /// Much slower than [`spawn`](Self::spawn) in simulated time, but the
    /// counter passes through every intermediate value at an observable
    /// rate, which waits that watch the raw counter need.
    pub fn spawn_per_count(clock: Arc<SoftwareClock<SimTimer>>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            while !thread_stop.load(Ordering::Relaxed) {
                clock.timer().advance_counts(1);
                if clock.timer().overflow_pending() {
                    // A masked tick stays pending and fires at unmask.
                    while !clock.timer().tick_irq_enabled() {
                        std::hint::spin_loop();
                    }
                    clock.on_tick();
                }
                std::thread::sleep(interval);
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for BackgroundTicker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _joined = handle.join();
        }
    }
}

/// Deterministic non-uniform image for scan fixtures. Distinct from both
/// all-zeros and erased flash so checksum regressions cannot hide.
pub fn patterned_image(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| {
            let i = i as u32;
            (i.wrapping_mul(31).wrapping_add(i >> 3) & 0xFF) as u8
        })
        .collect()
}
