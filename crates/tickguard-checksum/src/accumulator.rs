//! The checksum algorithm contract and the owned incremental accumulator.

use core::marker::PhantomData;

/// Three-operation contract shared by both checksum algorithms.
///
/// An algorithm is a pure byte-at-a-time transition function over a 16-bit
/// state: start from [`INIT`](Self::INIT), fold each byte with
/// [`update`](Self::update), and read the result with
/// [`finalize`](Self::finalize). The two implementations are interchangeable
/// anywhere a `ChecksumAlgorithm` type parameter is accepted, but their
/// states must never be mixed.
pub trait ChecksumAlgorithm {
    /// Initial accumulator state.
    const INIT: u16;

    /// Human-readable algorithm name for diagnostics.
    const NAME: &'static str;

    /// Fold one byte into the running state.
    ///
    /// Pure function of the prior state and the input byte.
    ///
    /// # Real-Time Safety
    ///
    /// WCET: bounded, no loops over unbounded data.
    #[must_use]
    fn update(state: u16, byte: u8) -> u16;

    /// Transform the running state into the published result.
    ///
    /// Identity for both algorithms shipped here; kept in the contract so
    /// callers never bake that assumption in.
    #[must_use]
    fn finalize(state: u16) -> u16 {
        state
    }
}

/// Owned incremental checksum accumulator.
///
/// The typed counterpart of the initialize/update/finalize function triple:
/// the algorithm identity travels with the state, so a CRC16 accumulator can
/// never be fed into a Fletcher-16 finalize.
#[derive(Debug, PartialEq, Eq)]
pub struct Accumulator<A: ChecksumAlgorithm> {
    state: u16,
    _algorithm: PhantomData<A>,
}

// Manual impls: the derive would require `A: Clone`/`A: Copy`, but the fields
// are copyable regardless of the algorithm marker type.
impl<A: ChecksumAlgorithm> Clone for Accumulator<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ChecksumAlgorithm> Copy for Accumulator<A> {}

impl<A: ChecksumAlgorithm> Accumulator<A> {
    /// Create a fresh accumulator at the algorithm's initializer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: A::INIT,
            _algorithm: PhantomData,
        }
    }

    /// Fold one byte into the accumulator.
    pub fn update(&mut self, byte: u8) {
        self.state = A::update(self.state, byte);
    }

    /// Fold a contiguous byte slice, front to back.
    pub fn update_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.update(byte);
        }
    }

    /// Current raw state, before finalization.
    #[must_use]
    pub fn state(&self) -> u16 {
        self.state
    }

    /// Finalize and return the checksum result.
    #[must_use]
    pub fn finalize(self) -> u16 {
        A::finalize(self.state)
    }
}

impl<A: ChecksumAlgorithm> Default for Accumulator<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot, blocking checksum over a contiguous byte slice.
///
/// Convenience for startup-time computations; the background scanner uses
/// per-byte [`Accumulator::update`] instead. Definitionally equal to folding
/// the slice one byte at a time.
#[must_use]
pub fn checksum_slice<A: ChecksumAlgorithm>(bytes: &[u8]) -> u16 {
    let mut acc = Accumulator::<A>::new();
    acc.update_slice(bytes);
    acc.finalize()
}
