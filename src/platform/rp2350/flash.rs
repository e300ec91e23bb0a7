//! RP2350 QSPI flash driver
//!
//! Reads go through the memory-mapped XIP window. Erase and program use
//! the boot ROM routines, which need XIP switched off for their duration.
//!
//! # Safety
//!
//! While XIP is off, nothing may execute from or read flash:
//! - interrupts are masked for the whole operation
//! - the second core must be parked or running from RAM

use crate::platform::{traits::FlashInterface, FlashLayout, Result};
use rp235x_hal::rom_data;

/// Sector erase command (4 KB)
const SECTOR_ERASE_CMD: u8 = 0x20;

/// Flash is memory-mapped here for reads
const XIP_BASE: usize = 0x1000_0000;

/// Boot ROM backed flash access
pub struct Rp2350Flash {
    layout: FlashLayout,
}

impl Rp2350Flash {
    /// Driver for the Pico 2 W flash chip
    pub fn new() -> Self {
        Self::with_layout(FlashLayout::PICO2_W)
    }

    /// Driver for a board with a different chip or firmware reservation
    pub fn with_layout(layout: FlashLayout) -> Self {
        Self { layout }
    }

    /// Run a ROM flash routine with XIP disabled
    ///
    /// # Safety
    ///
    /// `op` must not touch XIP memory.
    unsafe fn rom_op<R>(op: impl FnOnce() -> R) -> R {
        cortex_m::interrupt::free(|_cs| {
            // SAFETY: interrupts are masked and nothing below reads flash
            unsafe {
                rom_data::connect_internal_flash();
                rom_data::flash_exit_xip();
            }

            let result = op();

            // SAFETY: restores the state the ROM routines expect on exit
            unsafe {
                rom_data::flash_flush_cache();
                rom_data::flash_enter_cmd_xip();
            }

            result
        })
    }
}

impl Default for Rp2350Flash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for Rp2350Flash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        self.layout.check_read(address, buf.len())?;

        let src = (XIP_BASE + address as usize) as *const u8;
        // SAFETY: range is inside the mapped flash window
        unsafe {
            core::ptr::copy_nonoverlapping(src, buf.as_mut_ptr(), buf.len());
        }
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        self.layout.check_write(address, data.len())?;

        // SAFETY: range validated, data lives in RAM
        unsafe {
            Self::rom_op(|| {
                rom_data::flash_range_program(address, data.as_ptr(), data.len());
            });
        }
        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        self.layout.check_erase(address, size)?;

        let block_size = self.layout.block_size;
        // SAFETY: range validated and block-aligned
        unsafe {
            Self::rom_op(|| {
                rom_data::flash_range_erase(address, size as usize, block_size, SECTOR_ERASE_CMD);
            });
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
