//! Prelude for tickguard-clock.
//!
//! Re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use tickguard_clock::prelude::*;
//!
//! let clock = SoftwareClock::new(SimTimer::with_1ms_tick());
//! clock.start();
//! assert_eq!(clock.millis(), 0);
//! ```

pub use crate::clock::{LONG_DELAY_THRESHOLD_MS, MICROS_PER_TICK, SoftwareClock};
pub use crate::sim::SimTimer;
pub use crate::state::ClockState;
pub use crate::timer::{TickMaskGuard, TickTimer};
