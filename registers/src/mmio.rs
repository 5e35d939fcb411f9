/*++

Licensed under the Apache-2.0 license.

File Name:

    mmio.rs

Abstract:

    File contains the memory-mapped register access trait.

--*/

/// Word access to a register window, addressed by byte offset from the
/// window base.
pub trait Mmio {
    /// Loads the 32-bit register at `offset`.
    fn read32(&self, offset: u32) -> u32;

    /// Stores `val` to the 32-bit register at `offset`.
    fn write32(&self, offset: u32, val: u32);

    /// Read-modify-write: clears `clear` then sets `set`.
    fn clrsetbits32(&self, offset: u32, clear: u32, set: u32) {
        let val = self.read32(offset);
        self.write32(offset, (val & !clear) | set);
    }
}

/// Volatile access to a physical register window.
#[derive(Debug)]
pub struct RealMmio {
    base: usize,
}

impl RealMmio {
    /// Create a register window at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the virtual address of a mapped register window at
    /// least as large as the highest offset accessed through it, and no other
    /// code may treat that range as ordinary memory.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the window
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl Mmio for RealMmio {
    fn read32(&self, offset: u32) -> u32 {
        // SAFETY: the constructor's contract guarantees the window is mapped.
        unsafe { core::ptr::read_volatile((self.base + offset as usize) as *const u32) }
    }

    fn write32(&self, offset: u32, val: u32) {
        // SAFETY: the constructor's contract guarantees the window is mapped.
        unsafe { core::ptr::write_volatile((self.base + offset as usize) as *mut u32, val) }
    }
}
