//! Fletcher-16, the fast variant.
//!
//! Two 8-bit running sums packed into one 16-bit state: `sum1` in the low
//! byte, `sum2` in the high byte, both reduced modulo 255 (not 256 - the
//! reduction is what gives Fletcher its position sensitivity). Chosen for
//! bulk memory scans where per-byte cost matters more than error-detection
//! strength.

use crate::accumulator::ChecksumAlgorithm;

/// Fletcher-16 checksum algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fletcher16;

impl ChecksumAlgorithm for Fletcher16 {
    const INIT: u16 = 0x0000;
    const NAME: &'static str = "Fletcher-16";

    fn update(state: u16, byte: u8) -> u16 {
        let mut sum1 = u16::from(state as u8);
        let mut sum2 = state >> 8;

        sum1 = (sum1 + u16::from(byte)) % 255;
        sum2 = (sum2 + sum1) % 255;

        (sum2 << 8) | sum1
    }
}
