//! # tickguard-memscan
//!
//! Incremental memory-integrity scanning over a flat 32-bit address space.
//!
//! A full-range checksum computed in one call stalls every other periodic
//! task for the scan duration (hundreds of milliseconds for a 64 KiB flash
//! on the target class of hardware). [`MemoryScanner`] instead folds exactly
//! one byte per [`step`](MemoryScanner::step) - invoked once per scheduler
//! tick - bounding the added latency of any single tick to one memory read
//! plus one checksum update. A full pass completes every `range.len()`
//! ticks, publishes its result, and the cursor restarts: an unending cycle
//! of independent, reproducible checksums.
//!
//! The blocking one-shot counterpart [`checksum_range`] exists for the
//! startup use case and is definitionally equal to `range.len()` scanner
//! steps over the same memory.
//!
//! Comparing a published checksum against a stored reference value is the
//! caller's concern; this crate only produces the value.
//!
//! ## Example
//!
//! ```rust
//! use tickguard_memscan::prelude::*;
//!
//! let image = [0xA5u8; 64];
//! let bus = SliceMemory::new(0x8000, &image);
//! let range = ScanRange::new(0x8000, 0x803F).expect("valid range");
//!
//! let mut scanner = MemoryScanner::<Fletcher16>::new(range);
//! let mut result = None;
//! while result.is_none() {
//!     result = scanner.step(&bus);
//! }
//! assert_eq!(result, Some(checksum_range::<Fletcher16, _>(&bus, range)));
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

pub mod error;
pub mod memory;
pub mod prelude;
pub mod scanner;

pub use error::{MemScanError, MemScanResult};
pub use memory::{MemoryBus, SliceMemory};
pub use scanner::{MemoryScanner, ScanRange, checksum_range};
