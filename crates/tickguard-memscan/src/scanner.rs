//! The scan cursor and the incremental scanner itself.

use tickguard_checksum::{Accumulator, ChecksumAlgorithm};

use crate::error::{MemScanError, MemScanResult};
use crate::memory::MemoryBus;

/// An inclusive address range to scan, validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    start: u32,
    end: u32,
}

impl ScanRange {
    /// Create a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`MemScanError::InvalidRange`] if `start > end`.
    pub fn new(start: u32, end: u32) -> MemScanResult<Self> {
        if start > end {
            return Err(MemScanError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First address (inclusive).
    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last address (inclusive).
    #[must_use]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of addresses in the range.
    ///
    /// `u64` because a full 32-bit range does not fit in `u32`.
    #[must_use]
    pub fn len(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }

    /// Ranges are never empty; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Incremental one-byte-per-step memory scanner.
///
/// Owns the scan cursor: the configured range, the current address, and the
/// running accumulator. Each [`step`](Self::step) folds exactly one byte; on
/// completing the range the result is finalized and published, and the
/// cursor restarts at the range start with a fresh accumulator.
#[derive(Debug, Clone)]
pub struct MemoryScanner<A: ChecksumAlgorithm> {
    range: ScanRange,
    cursor: u32,
    accumulator: Accumulator<A>,
    last_checksum: Option<u16>,
    completed_passes: u32,
}

impl<A: ChecksumAlgorithm> MemoryScanner<A> {
    /// Create a scanner with its cursor at the range start.
    #[must_use]
    pub fn new(range: ScanRange) -> Self {
        Self {
            range,
            cursor: range.start(),
            accumulator: Accumulator::new(),
            last_checksum: None,
            completed_passes: 0,
        }
    }

    /// The configured range.
    #[must_use]
    pub fn range(&self) -> ScanRange {
        self.range
    }

    /// Address the next step will read.
    #[must_use]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Most recently completed pass checksum, if any pass has finished.
    #[must_use]
    pub fn last_checksum(&self) -> Option<u16> {
        self.last_checksum
    }

    /// Number of completed full passes.
    #[must_use]
    pub fn completed_passes(&self) -> u32 {
        self.completed_passes
    }

    /// Fold one byte and advance the cursor. Call once per scheduler tick.
    ///
    /// Returns `Some(checksum)` when this step completed a full pass; the
    /// cursor is then already back at the range start with a fresh
    /// accumulator. Returns `None` otherwise.
    ///
    /// # Real-Time Safety
    ///
    /// One memory read plus one checksum update per call, no loops.
    pub fn step<M: MemoryBus>(&mut self, bus: &M) -> Option<u16> {
        self.accumulator.update(bus.read_byte(self.cursor));

        if self.cursor == self.range.end() {
            let checksum = self.accumulator.finalize();
            self.last_checksum = Some(checksum);
            self.completed_passes = self.completed_passes.wrapping_add(1);
            self.cursor = self.range.start();
            self.accumulator = Accumulator::new();
            Some(checksum)
        } else {
            self.cursor += 1;
            None
        }
    }

    /// Abandon the pass in progress and restart at the range start.
    ///
    /// Published results from earlier passes are kept.
    pub fn rewind(&mut self) {
        self.cursor = self.range.start();
        self.accumulator = Accumulator::new();
    }
}

/// One-shot, blocking checksum over `range`. Startup use case.
///
/// Equal by construction to running [`MemoryScanner::step`] `range.len()`
/// times over the same memory contents.
#[must_use]
pub fn checksum_range<A: ChecksumAlgorithm, M: MemoryBus>(bus: &M, range: ScanRange) -> u16 {
    let mut accumulator = Accumulator::<A>::new();
    let mut address = range.start();
    loop {
        accumulator.update(bus.read_byte(address));
        if address == range.end() {
            break;
        }
        address += 1;
    }
    accumulator.finalize()
}
