//! CRC16-CCITT, the strong variant.
//!
//! Polynomial `0x1021`, initializer `0xFFFF`, MSB-first bit order, no final
//! XOR. Low collision probability for short tag sequences, which is why the
//! flow-integrity assertion reuses it.

use crate::accumulator::ChecksumAlgorithm;

/// CCITT generator polynomial (x^16 + x^12 + x^5 + 1).
const POLYNOMIAL: u16 = 0x1021;

/// CRC16-CCITT checksum algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16Ccitt;

impl ChecksumAlgorithm for Crc16Ccitt {
    const INIT: u16 = 0xFFFF;
    const NAME: &'static str = "CRC16-CCITT";

    fn update(state: u16, byte: u8) -> u16 {
        let mut crc = state ^ (u16::from(byte) << 8);
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
        crc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::checksum_slice;

    #[test]
    fn test_standard_check_value() {
        // The canonical CRC16-CCITT (0xFFFF) check input.
        assert_eq!(checksum_slice::<Crc16Ccitt>(b"123456789"), 0x29B1);
    }

    #[test]
    fn test_ascii_digits() {
        assert_eq!(checksum_slice::<Crc16Ccitt>(b"1234"), 0x5349);
    }

    #[test]
    fn test_unit_tag_sequence() {
        // Accepting value for the four-unit tag sequence 0x01..0x04.
        assert_eq!(checksum_slice::<Crc16Ccitt>(&[0x01, 0x02, 0x03, 0x04]), 0x89C3);
    }

    #[test]
    fn test_single_zero_byte_changes_state() {
        // CRC16 with a non-zero initializer detects leading zero bytes.
        assert_ne!(Crc16Ccitt::update(Crc16Ccitt::INIT, 0x00), Crc16Ccitt::INIT);
    }

    #[test]
    fn test_order_sensitivity() {
        let forward = checksum_slice::<Crc16Ccitt>(&[0x01, 0x02]);
        let reversed = checksum_slice::<Crc16Ccitt>(&[0x02, 0x01]);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_finalize_is_identity() {
        assert_eq!(Crc16Ccitt::finalize(0x1234), 0x1234);
    }
}
