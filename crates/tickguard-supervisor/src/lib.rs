//! # tickguard-supervisor
//!
//! Checksum-gated watchdog supervision: prove that a fixed sequence of work
//! units ran, in order, exactly once per control-loop iteration, before the
//! hardware watchdog is serviced.
//!
//! Two interchangeable encodings of the same invariant are provided behind
//! the [`FlowAssertion`] trait:
//! - [`ChecksumFlow`] - a running CRC16-CCITT seeded at `0xFFFF`; each work
//!   unit folds its unique tag, and only the exact expected sequence reaches
//!   the precomputed accepting value.
//! - [`OrdinalFlow`] - an explicit ordinal state machine; a transition
//!   advances only when its predecessor state is exactly the expected one,
//!   and an out-of-order or repeated tag is a silent no-op.
//!
//! [`SupervisionController::end_iteration`] services the watchdog peripheral
//! if and only if the flow assertion is satisfied AND servicing is enabled.
//! Withholding is not an error: the starved watchdog eventually forces a
//! hardware reset, which is the intended fail-safe.
//!
//! The pattern generalizes to any fixed, statically known sequence of N work
//! units per iteration.
//!
//! ## Example
//!
//! ```rust
//! use tickguard_supervisor::prelude::*;
//!
//! const TAGS: [u8; 4] = [0x01, 0x02, 0x03, 0x04];
//!
//! let flow = ChecksumFlow::new(&TAGS).expect("non-empty tag sequence");
//! let mut controller = SupervisionController::new(flow);
//! let mut watchdog = SoftwareWatchdog::with_timeout_ms(20);
//!
//! controller.begin_iteration();
//! for tag in TAGS {
//!     controller.record_unit(tag);
//! }
//! assert_eq!(controller.end_iteration(&mut watchdog), ServiceDecision::Serviced);
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

pub mod controller;
pub mod error;
pub mod flow;
pub mod peripheral;
pub mod prelude;
pub mod software_impl;

pub use controller::{ServiceDecision, SupervisionController, SupervisionMetrics};
pub use error::{SupervisorError, SupervisorResult};
pub use flow::{ChecksumFlow, FlowAssertion, OrdinalFlow};
pub use peripheral::WatchdogPeripheral;
pub use software_impl::SoftwareWatchdog;
