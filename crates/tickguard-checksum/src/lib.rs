//! # tickguard-checksum
//!
//! Incremental checksum primitives for flow and memory integrity.
//!
//! This crate provides the two byte-at-a-time checksum algorithms the rest of
//! TickGuard is built on:
//! - [`Crc16Ccitt`] - CRC16-CCITT (polynomial `0x1021`, initializer `0xFFFF`).
//!   Strong error detection, used for flow-integrity assertions where the
//!   input is a short sequence of unit tags.
//! - [`Fletcher16`] - Fletcher-16 (two mod-255 running sums). Roughly 3x
//!   faster per byte than CRC16, used for bulk background memory scans.
//!
//! Both expose the same three-operation contract through the
//! [`ChecksumAlgorithm`] trait: an initializer constant, a pure
//! `update(state, byte)` transition function, and a `finalize(state)` step
//! (identity for both algorithms). Identical byte sequences always produce
//! identical results; there is no hidden state beyond the 16-bit value.
//!
//! ## Real-Time Safety
//!
//! - No heap allocations
//! - No blocking operations
//! - `update()` is a pure function with bounded WCET (8 shift/XOR iterations
//!   for CRC16, two additions and two mod-255 reductions for Fletcher-16)
//!
//! ## Example
//!
//! ```rust
//! use tickguard_checksum::prelude::*;
//!
//! // Incremental, one byte at a time.
//! let mut acc = Accumulator::<Crc16Ccitt>::new();
//! for byte in [0x01, 0x02, 0x03, 0x04] {
//!     acc.update(byte);
//! }
//! assert_eq!(acc.finalize(), 0x89C3);
//!
//! // One-shot over a contiguous slice.
//! assert_eq!(checksum_slice::<Crc16Ccitt>(&[0x01, 0x02, 0x03, 0x04]), 0x89C3);
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

pub mod accumulator;
pub mod crc16;
pub mod fletcher16;
pub mod prelude;

pub use accumulator::{Accumulator, ChecksumAlgorithm, checksum_slice};
pub use crc16::Crc16Ccitt;
pub use fletcher16::Fletcher16;
