//! Prelude for tickguard-supervisor.
//!
//! Re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use tickguard_supervisor::prelude::*;
//!
//! let flow = OrdinalFlow::new(&[1, 2, 3]).expect("non-empty tag sequence");
//! let controller = SupervisionController::new(flow);
//! assert!(controller.servicing_enabled());
//! ```

pub use crate::controller::{ServiceDecision, SupervisionController, SupervisionMetrics};
pub use crate::error::{SupervisorError, SupervisorResult};
pub use crate::flow::{ChecksumFlow, FlowAssertion, OrdinalFlow};
pub use crate::peripheral::WatchdogPeripheral;
pub use crate::software_impl::SoftwareWatchdog;
