/*++

Licensed under the Apache-2.0 license.

File Name:

    regs.rs

Abstract:

    File contains the register protocol of the hash engine: data writes,
    busy and digest-ready polling, and stream control.

--*/

use hashacc_error::{HashAccError, HashAccResult};
use hashacc_registers::{
    hash_csr, hash_hr, Mmio, HASH_CR, HASH_DIN, HASH_IMR, HASH_SR, HASH_STR, SR, STR,
};
use tock_registers::LocalRegisterCopy;

use crate::engine::{HashPlatform, HASH_TIMEOUT_US};
use crate::wait::{until_timeout, PollResult};

/// Register view of the engine, valid while the caller holds hardware access
pub(crate) struct HashRegs<'a, P: HashPlatform> {
    platform: &'a P,
}

impl<'a, P: HashPlatform> HashRegs<'a, P> {
    pub(crate) fn new(platform: &'a P) -> Self {
        Self { platform }
    }

    fn mmio(&self) -> &P::Mmio {
        self.platform.mmio()
    }

    fn status(&self) -> LocalRegisterCopy<u32, SR::Register> {
        LocalRegisterCopy::new(self.mmio().read32(HASH_SR))
    }

    pub(crate) fn cr(&self) -> u32 {
        self.mmio().read32(HASH_CR)
    }

    pub(crate) fn set_cr(&self, val: u32) {
        self.mmio().write32(HASH_CR, val)
    }

    pub(crate) fn str(&self) -> u32 {
        self.mmio().read32(HASH_STR)
    }

    pub(crate) fn set_str(&self, val: u32) {
        self.mmio().write32(HASH_STR, val)
    }

    pub(crate) fn imr(&self) -> u32 {
        self.mmio().read32(HASH_IMR)
    }

    pub(crate) fn set_imr(&self, val: u32) {
        self.mmio().write32(HASH_IMR, val)
    }

    pub(crate) fn csr(&self, idx: usize) -> u32 {
        self.mmio().read32(hash_csr(idx))
    }

    pub(crate) fn set_csr(&self, idx: usize, val: u32) {
        self.mmio().write32(hash_csr(idx), val)
    }

    pub(crate) fn hr(&self, idx: usize) -> u32 {
        self.mmio().read32(hash_hr(idx))
    }

    /// The input FIFO can take a new block
    pub(crate) fn input_ready(&self) -> bool {
        self.status().is_set(SR::DINIS)
    }

    /// Wait for the engine to leave the busy state
    pub(crate) fn wait_end_busy(&self) -> HashAccResult<()> {
        let result = until_timeout(
            || self.platform.now_us(),
            HASH_TIMEOUT_US,
            || !self.status().is_set(SR::BUSY),
        );
        if result == PollResult::TimedOut {
            log::debug!("Busy timeout");
            return Err(HashAccError::DRIVER_HASH_BUSY_TIMEOUT);
        }
        Ok(())
    }

    /// Wait for the digest registers to hold a result
    pub(crate) fn wait_digest_ready(&self) -> HashAccResult<()> {
        let result = until_timeout(
            || self.platform.now_us(),
            HASH_TIMEOUT_US,
            || self.status().is_set(SR::DCIS),
        );
        if result == PollResult::TimedOut {
            log::debug!("Ready timeout");
            return Err(HashAccError::DRIVER_HASH_DIGEST_TIMEOUT);
        }
        Ok(())
    }

    /// Push one word into the input FIFO
    pub(crate) fn write_data(&self, word: u32) -> HashAccResult<()> {
        self.mmio().write32(HASH_DIN, word);
        self.wait_end_busy()
    }

    /// Number of valid bytes in the last word of the current pass (0 = all four)
    pub(crate) fn set_nblw(&self, valid_bytes: usize) {
        self.mmio().clrsetbits32(
            HASH_STR,
            STR::NBLW.mask << STR::NBLW.shift,
            STR::NBLW.val(8 * (valid_bytes % 4) as u32).value,
        );
    }

    /// Close the current pass and start padding/calculation
    pub(crate) fn start_calc(&self) {
        self.mmio().clrsetbits32(HASH_STR, 0, STR::DCAL::SET.value);
    }
}
