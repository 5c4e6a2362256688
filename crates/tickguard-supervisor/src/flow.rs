//! Per-iteration flow-integrity assertions.

use tickguard_checksum::{ChecksumAlgorithm, Crc16Ccitt, checksum_slice};

use crate::error::{SupervisorError, SupervisorResult};

/// A per-iteration proof that every expected work unit ran, in order,
/// exactly once.
///
/// The state is reset at the start of every control-loop iteration, each
/// work unit records its unique tag on completion, and the terminal
/// (accepting) value is reachable only through the exact expected sequence.
pub trait FlowAssertion {
    /// Reset the assertion state for a new iteration.
    fn begin_iteration(&mut self);

    /// Record completion of the work unit carrying `tag`.
    ///
    /// Never fails; a tag that does not fit the expected sequence leaves
    /// the assertion unable to reach its accepting state.
    fn record(&mut self, tag: u8);

    /// Whether the assertion has reached its accepting state.
    fn is_satisfied(&self) -> bool;
}

/// Checksum-encoded flow assertion.
///
/// States are arbitrary 16-bit CRC values. The accepting constant is
/// precomputed at construction by folding the full expected tag sequence
/// into the CRC16-CCITT initializer; any permutation, omission, or
/// duplication of the recorded tags yields a different terminal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumFlow<'a> {
    expected_tags: &'a [u8],
    accepting: u16,
    state: u16,
}

impl<'a> ChecksumFlow<'a> {
    /// Create a flow assertion over the expected tag sequence.
    ///
    /// Tags must be unique within the sequence for the in-order-exactly-once
    /// reading to hold.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::EmptyTagSequence`] for an empty sequence.
    pub fn new(expected_tags: &'a [u8]) -> SupervisorResult<Self> {
        if expected_tags.is_empty() {
            return Err(SupervisorError::EmptyTagSequence);
        }
        Ok(Self {
            expected_tags,
            accepting: checksum_slice::<Crc16Ccitt>(expected_tags),
            state: Crc16Ccitt::INIT,
        })
    }

    /// The precomputed accepting constant.
    #[must_use]
    pub fn accepting_value(&self) -> u16 {
        self.accepting
    }

    /// Current running value, before finalization.
    #[must_use]
    pub fn current(&self) -> u16 {
        self.state
    }

    /// The expected tag sequence.
    #[must_use]
    pub fn expected_tags(&self) -> &'a [u8] {
        self.expected_tags
    }
}

impl FlowAssertion for ChecksumFlow<'_> {
    fn begin_iteration(&mut self) {
        self.state = Crc16Ccitt::INIT;
    }

    fn record(&mut self, tag: u8) {
        self.state = Crc16Ccitt::update(self.state, tag);
    }

    fn is_satisfied(&self) -> bool {
        Crc16Ccitt::finalize(self.state) == self.accepting
    }
}

/// Ordinal flow assertion.
///
/// States are the enumerated positions `0..=N` in the expected sequence. A
/// recorded tag advances the state only when it is exactly the next expected
/// tag; any other tag is a silent no-op. A skipped work unit therefore
/// leaves the state stuck below the terminal position for the rest of the
/// iteration. Unlike [`ChecksumFlow`], a *repeated* in-order unit merely
/// fails to advance and does not poison the iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinalFlow<'a> {
    expected_tags: &'a [u8],
    position: usize,
}

impl<'a> OrdinalFlow<'a> {
    /// Create an ordinal assertion over the expected tag sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::EmptyTagSequence`] for an empty sequence.
    pub fn new(expected_tags: &'a [u8]) -> SupervisorResult<Self> {
        if expected_tags.is_empty() {
            return Err(SupervisorError::EmptyTagSequence);
        }
        Ok(Self {
            expected_tags,
            position: 0,
        })
    }

    /// Number of units recorded in order so far this iteration.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The expected tag sequence.
    #[must_use]
    pub fn expected_tags(&self) -> &'a [u8] {
        self.expected_tags
    }
}

impl FlowAssertion for OrdinalFlow<'_> {
    fn begin_iteration(&mut self) {
        self.position = 0;
    }

    fn record(&mut self, tag: u8) {
        if self.expected_tags.get(self.position) == Some(&tag) {
            self.position += 1;
        }
    }

    fn is_satisfied(&self) -> bool {
        self.position == self.expected_tags.len()
    }
}
