//! Prelude for tickguard-memscan.
//!
//! Re-exports the most commonly used types, plus the checksum algorithms
//! the scanner is parameterized over.
//!
//! # Example
//!
//! ```rust
//! use tickguard_memscan::prelude::*;
//!
//! let bus = SliceMemory::new(0, &[1, 2, 3]);
//! let range = ScanRange::new(0, 2).expect("valid range");
//! let checksum = checksum_range::<Crc16Ccitt, _>(&bus, range);
//! assert_ne!(checksum, 0);
//! ```

pub use crate::error::{MemScanError, MemScanResult};
pub use crate::memory::{MemoryBus, SliceMemory};
pub use crate::scanner::{MemoryScanner, ScanRange, checksum_range};

pub use tickguard_checksum::{Crc16Ccitt, Fletcher16};
