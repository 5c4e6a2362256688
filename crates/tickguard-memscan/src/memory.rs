//! The byte-addressable memory capability trait.

/// Read access to a flat 32-bit byte-addressable address space.
///
/// The scanner assumes reads are side-effect-free and constant-time; this is
/// the `read_byte(address)` boundary to flash, EEPROM, or RAM.
pub trait MemoryBus {
    /// Read one byte at `address`.
    ///
    /// Addresses outside the backing store return `0xFF`, matching erased
    /// flash.
    fn read_byte(&self, address: u32) -> u8;
}

impl<M: MemoryBus + ?Sized> MemoryBus for &M {
    fn read_byte(&self, address: u32) -> u8 {
        (**self).read_byte(address)
    }
}

/// A [`MemoryBus`] backed by a byte slice mapped at a base address.
///
/// The in-memory stand-in for a flash image, used by tests and the
/// simulation binary.
#[derive(Debug, Clone, Copy)]
pub struct SliceMemory<'a> {
    base: u32,
    bytes: &'a [u8],
}

impl<'a> SliceMemory<'a> {
    /// Map `bytes` starting at `base`.
    #[must_use]
    pub fn new(base: u32, bytes: &'a [u8]) -> Self {
        Self { base, bytes }
    }

    /// First mapped address.
    #[must_use]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Last mapped address, or `base` for an empty slice.
    #[must_use]
    pub fn end(&self) -> u32 {
        let len = u32::try_from(self.bytes.len()).unwrap_or(u32::MAX);
        self.base.wrapping_add(len.saturating_sub(1))
    }
}

impl MemoryBus for SliceMemory<'_> {
    fn read_byte(&self, address: u32) -> u8 {
        address
            .checked_sub(self.base)
            .and_then(|offset| self.bytes.get(offset as usize))
            .copied()
            .unwrap_or(0xFF)
    }
}
