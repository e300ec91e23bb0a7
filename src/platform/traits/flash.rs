//! Flash interface trait
//!
//! The configuration store only needs raw block access: read anywhere,
//! erase whole blocks, program erased bytes.
//!
//! # Flash Characteristics
//!
//! - Erase sets every byte of a block to 0xFF
//! - Programming can only clear bits (1→0), so a block is erased before
//!   every rewrite
//! - Programming works on whole pages (256 bytes on the RP2350 boot ROM):
//!   address and length must both be page multiples
//! - Operations are blocking
//!
//! # Memory Layout (Pico 2 W)
//!
//! ```text
//! [Firmware]           0x000000 - 0x040000 (256 KB) - DO NOT WRITE
//! [Config Block]       0x040000 - 0x041000 (4 KB)
//! [Free]               0x041000 - 0x400000
//! ```

use crate::platform::{error::FlashError, Result};

/// Raw flash access
///
/// One owner per instance; implementations reject erase and program
/// requests that touch the firmware image.
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// `FlashError::InvalidAddress` if the range runs past the end of flash.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Program `data` at `address`; the range must be erased beforehand
    ///
    /// # Errors
    ///
    /// `FlashError::InvalidAddress` if the range is out of bounds, overlaps
    /// the firmware image, or is not page-aligned in address and length.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// `FlashError::InvalidAddress` if the range is out of bounds, overlaps
    /// the firmware image, or is not block-aligned.
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Minimum erasable unit size
    fn block_size(&self) -> u32;

    /// Programming unit size; writes are whole pages
    fn page_size(&self) -> u32;

    /// Total flash capacity in bytes
    fn capacity(&self) -> u32;
}

impl<F: FlashInterface + ?Sized> FlashInterface for &mut F {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        (**self).read(address, buf)
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        (**self).write(address, data)
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        (**self).erase(address, size)
    }

    fn block_size(&self) -> u32 {
        (**self).block_size()
    }

    fn page_size(&self) -> u32 {
        (**self).page_size()
    }

    fn capacity(&self) -> u32 {
        (**self).capacity()
    }
}

/// Geometry of a flash chip and the part of it drivers may modify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashLayout {
    /// Total size in bytes
    pub capacity: u32,
    /// Erase unit in bytes
    pub block_size: u32,
    /// Program unit in bytes
    pub page_size: u32,
    /// First address past the firmware image
    pub writable_start: u32,
}

impl FlashLayout {
    /// Pico 2 W: 4 MB QSPI flash, 4 KB sectors, 256-byte pages, 256 KB
    /// reserved for firmware
    pub const PICO2_W: Self = Self {
        capacity: 4 * 1024 * 1024,
        block_size: 4096,
        page_size: 256,
        writable_start: 0x40000,
    };

    /// Number of erase blocks
    pub fn block_count(&self) -> usize {
        (self.capacity / self.block_size) as usize
    }

    /// Range check for reads
    pub fn check_read(&self, address: u32, len: usize) -> Result<()> {
        if address as u64 + len as u64 > self.capacity as u64 {
            return Err(FlashError::InvalidAddress.into());
        }
        Ok(())
    }

    /// Range check for programming; whole pages outside the firmware image
    pub fn check_write(&self, address: u32, len: usize) -> Result<()> {
        let page = self.page_size as usize;
        if !address.is_multiple_of(self.page_size) || !len.is_multiple_of(page) {
            return Err(FlashError::InvalidAddress.into());
        }
        self.check_modifiable(address, len)
    }

    /// Range check for erasing; both ends must sit on block boundaries
    pub fn check_erase(&self, address: u32, size: u32) -> Result<()> {
        if !address.is_multiple_of(self.block_size) || !size.is_multiple_of(self.block_size) {
            return Err(FlashError::InvalidAddress.into());
        }
        self.check_modifiable(address, size as usize)
    }

    fn check_modifiable(&self, address: u32, len: usize) -> Result<()> {
        if address < self.writable_start {
            return Err(FlashError::InvalidAddress.into());
        }
        self.check_read(address, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformError;

    const LAYOUT: FlashLayout = FlashLayout::PICO2_W;
    const INVALID: PlatformError = PlatformError::Flash(FlashError::InvalidAddress);

    #[test]
    fn test_block_count() {
        assert_eq!(LAYOUT.block_count(), 1024);
    }

    #[test]
    fn test_reads_allowed_everywhere_in_bounds() {
        assert!(LAYOUT.check_read(0, 16).is_ok());
        assert!(LAYOUT.check_read(LAYOUT.capacity - 16, 16).is_ok());
        assert_eq!(LAYOUT.check_read(LAYOUT.capacity - 15, 16), Err(INVALID));
    }

    #[test]
    fn test_firmware_region_not_writable() {
        assert_eq!(LAYOUT.check_write(0x000100, 256), Err(INVALID));
        assert_eq!(LAYOUT.check_write(LAYOUT.writable_start - 256, 256), Err(INVALID));
        assert!(LAYOUT.check_write(LAYOUT.writable_start, 256).is_ok());
    }

    #[test]
    fn test_writes_must_cover_whole_pages() {
        let start = LAYOUT.writable_start;
        assert!(LAYOUT.check_write(start, 512).is_ok());
        assert!(LAYOUT.check_write(start + 256, 256).is_ok());
        assert_eq!(LAYOUT.check_write(start, 320), Err(INVALID));
        assert_eq!(LAYOUT.check_write(start + 2, 256), Err(INVALID));
        assert_eq!(LAYOUT.check_write(LAYOUT.capacity - 256, 512), Err(INVALID));
    }

    #[test]
    fn test_erase_requires_alignment() {
        assert!(LAYOUT.check_erase(0x040000, 4096).is_ok());
        assert_eq!(LAYOUT.check_erase(0x040100, 4096), Err(INVALID));
        assert_eq!(LAYOUT.check_erase(0x040000, 1024), Err(INVALID));
        assert_eq!(LAYOUT.check_erase(0x000000, 4096), Err(INVALID));
        assert_eq!(LAYOUT.check_erase(LAYOUT.capacity, 4096), Err(INVALID));
    }
}
