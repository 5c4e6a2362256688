//! Error types for scanner construction.

/// Errors that can occur while setting up a memory scan.
///
/// Scanning itself never fails; only range construction is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemScanError {
    /// The range start address is above its end address.
    InvalidRange {
        /// Requested start address (inclusive).
        start: u32,
        /// Requested end address (inclusive).
        end: u32,
    },
}

impl core::fmt::Display for MemScanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid scan range: start {start:#010X} > end {end:#010X}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MemScanError {}

/// A specialized `Result` type for memory scan setup.
pub type MemScanResult<T> = core::result::Result<T, MemScanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_error_display() {
        let err = MemScanError::InvalidRange {
            start: 0x9000,
            end: 0x8000,
        };
        assert_eq!(
            err.to_string(),
            "invalid scan range: start 0x00009000 > end 0x00008000"
        );
    }
}
