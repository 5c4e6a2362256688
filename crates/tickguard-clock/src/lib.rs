//! # tickguard-clock
//!
//! Interrupt-synchronized software clock for a single-core, cooperatively
//! scheduled firmware loop.
//!
//! The canonical time state lives in [`ClockState`] and is advanced only by
//! [`SoftwareClock::on_tick`], invoked from the periodic timer interrupt
//! (fixed 1 ms period). Foreground code reads time through
//! [`SoftwareClock::millis`] / [`SoftwareClock::micros`], which mask exactly
//! one interrupt source - the timer's own update interrupt - for the
//! duration of the multi-byte read and restore its prior state on every exit
//! path via an RAII guard. A global interrupt disable is never used.
//!
//! ## Concurrency model
//!
//! Exactly two logical contexts: one foreground loop and one timer interrupt.
//! The interrupt is the only writer of the counters; the foreground only
//! reads them (and clears the tick flag). Nothing here ever blocks the
//! interrupt; [`SoftwareClock::delay_ms`] blocks only the foreground by
//! spinning on the clock, which the interrupt keeps advancing.
//!
//! ## Failure semantics
//!
//! None of these operations can fail. Calling clock functions before
//! [`SoftwareClock::start`] is a caller ordering violation and out of scope.
//!
//! ## Example
//!
//! ```rust
//! use tickguard_clock::prelude::*;
//!
//! let clock = SoftwareClock::new(SimTimer::with_1ms_tick());
//! clock.start();
//!
//! // Interrupt context (here driven manually through the simulated timer):
//! clock.timer().advance_counts(SimTimer::DEFAULT_COUNTS_PER_TICK);
//! clock.on_tick();
//!
//! // Foreground context:
//! assert_eq!(clock.millis(), 1);
//! assert!(clock.tick_elapsed());
//! clock.clear_tick();
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod clock;
pub mod prelude;
pub mod sim;
pub mod state;
pub mod timer;

pub use clock::{LONG_DELAY_THRESHOLD_MS, MICROS_PER_TICK, SoftwareClock};
pub use sim::SimTimer;
pub use state::ClockState;
pub use timer::{TickMaskGuard, TickTimer};
