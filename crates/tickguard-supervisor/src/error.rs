//! Error types for supervision setup.

/// Errors that can occur while constructing a flow assertion.
///
/// Runtime transitions never fail - an out-of-order or repeated transition
/// is a silent no-op whose consequence is deferred watchdog starvation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorError {
    /// The expected tag sequence is empty; an empty sequence would accept
    /// every iteration unconditionally.
    EmptyTagSequence,
}

impl core::fmt::Display for SupervisorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyTagSequence => write!(f, "expected tag sequence must not be empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SupervisorError {}

/// A specialized `Result` type for supervision setup.
pub type SupervisorResult<T> = core::result::Result<T, SupervisorError>;
