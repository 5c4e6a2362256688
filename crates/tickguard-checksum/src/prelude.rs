//! Prelude for tickguard-checksum.
//!
//! Re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use tickguard_checksum::prelude::*;
//!
//! let crc = checksum_slice::<Crc16Ccitt>(b"123456789");
//! assert_eq!(crc, 0x29B1);
//! ```

pub use crate::accumulator::{Accumulator, ChecksumAlgorithm, checksum_slice};
pub use crate::crc16::Crc16Ccitt;
pub use crate::fletcher16::Fletcher16;
