//! In-memory flash for host tests
//!
//! Behaves like NOR flash: erase fills blocks with 0xFF, programming can
//! only clear bits and only whole pages. Tests can also count erases, corrupt bytes, and tear
//! the next write in half.

use crate::platform::{traits::FlashInterface, FlashLayout, Result};
use std::vec;
use std::vec::Vec;

/// Mock flash with the Pico 2 W geometry by default
///
/// # Example
///
/// ```ignore
/// use tiny_tweet::platform::mock::MockFlash;
/// use tiny_tweet::platform::FlashInterface;
///
/// let mut flash = MockFlash::new();
/// flash.erase(0x040000, 4096).unwrap();
/// flash.write(0x040000, &[0x5A; 256]).unwrap();
///
/// let mut buf = [0u8; 2];
/// flash.read(0x040000, &mut buf).unwrap();
/// assert_eq!(buf, [0x5A, 0x5A]);
/// assert_eq!(flash.get_erase_count(0x040000), 1);
/// ```
#[derive(Debug)]
pub struct MockFlash {
    layout: FlashLayout,
    storage: Vec<u8>,
    erase_counts: Vec<u32>,
    /// Next write is torn in half when set
    power_loss: bool,
}

impl MockFlash {
    /// Fully erased flash with the Pico 2 W geometry
    pub fn new() -> Self {
        Self::with_layout(FlashLayout::PICO2_W)
    }

    /// Fully erased flash with a custom geometry
    pub fn with_layout(layout: FlashLayout) -> Self {
        Self {
            layout,
            storage: vec![0xFF; layout.capacity as usize],
            erase_counts: vec![0; layout.block_count()],
            power_loss: false,
        }
    }

    /// Raw contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        let start = address as usize;
        self.storage[start..start + len].to_vec()
    }

    /// Overwrite bytes with 0xAA, bypassing erase rules
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        let start = address as usize;
        self.storage[start..start + len].fill(0xAA);
    }

    /// Number of times the block containing `address` has been erased
    pub fn get_erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / self.layout.block_size) as usize]
    }

    pub fn get_total_erase_count(&self) -> u32 {
        self.erase_counts.iter().sum()
    }

    /// The next write will only store its first half
    pub fn simulate_power_loss(&mut self) {
        self.power_loss = true;
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        self.layout.check_read(address, buf.len())?;

        let start = address as usize;
        buf.copy_from_slice(&self.storage[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        self.layout.check_write(address, data.len())?;

        let len = if core::mem::take(&mut self.power_loss) {
            data.len() / 2
        } else {
            data.len()
        };

        let start = address as usize;
        for (cell, byte) in self.storage[start..start + len].iter_mut().zip(data) {
            *cell &= *byte;
        }
        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        self.layout.check_erase(address, size)?;

        let start = address as usize;
        self.storage[start..start + size as usize].fill(0xFF);

        let first_block = (address / self.layout.block_size) as usize;
        let blocks = (size / self.layout.block_size) as usize;
        for count in &mut self.erase_counts[first_block..first_block + blocks] {
            *count += 1;
        }
        Ok(())
    }

    fn block_size(&self) -> u32 {
        self.layout.block_size
    }

    fn page_size(&self) -> u32 {
        self.layout.page_size
    }

    fn capacity(&self) -> u32 {
        self.layout.capacity
    }
}
