/*++

Licensed under the Apache-2.0 license.

File Name:

    context.rs

Abstract:

    File contains the per-session register snapshot used to suspend and
    resume a computation on the shared engine.

--*/

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashacc_error::{HashAccError, HashAccResult};
use hashacc_registers::CR;
use zeroize::Zeroize;

use crate::algo::{HashMode, SaveClass};
use crate::engine::HashPlatform;
use crate::regs::HashRegs;

/// Allocate a zeroed word array without aborting on exhaustion
fn try_zeroed<const N: usize>() -> HashAccResult<Box<[u32; N]>> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(N)
        .map_err(|_| HashAccError::DRIVER_HASH_OUT_OF_MEMORY)?;
    words.resize(N, 0u32);
    words
        .into_boxed_slice()
        .try_into()
        .map_err(|_| HashAccError::DRIVER_HASH_OUT_OF_MEMORY)
}

/// Context swap registers of one save class: the base range and, in HMAC
/// mode, the HMAC range
pub(crate) struct CsrBank<const BASE: usize, const HMAC: usize> {
    base: Box<[u32; BASE]>,
    hmac: Option<Box<[u32; HMAC]>>,
}

impl<const BASE: usize, const HMAC: usize> CsrBank<BASE, HMAC> {
    fn new(mode: HashMode) -> HashAccResult<Self> {
        let base = try_zeroed::<BASE>()?;
        let hmac = match mode {
            HashMode::Hash => None,
            HashMode::Hmac => Some(try_zeroed::<HMAC>()?),
        };
        Ok(Self { base, hmac })
    }

    fn save<P: HashPlatform>(&mut self, regs: &HashRegs<'_, P>, class: SaveClass) {
        let (first, _) = class.base_range();
        for (i, word) in self.base.iter_mut().enumerate() {
            *word = regs.csr(first + i);
        }
        if let Some(hmac) = self.hmac.as_mut() {
            let (first, _) = class.hmac_range();
            for (i, word) in hmac.iter_mut().enumerate() {
                *word = regs.csr(first + i);
            }
        }
    }

    fn restore<P: HashPlatform>(&self, regs: &HashRegs<'_, P>, class: SaveClass) {
        let (first, _) = class.base_range();
        for (i, word) in self.base.iter().enumerate() {
            regs.set_csr(first + i, *word);
        }
        if let Some(hmac) = self.hmac.as_ref() {
            let (first, _) = class.hmac_range();
            for (i, word) in hmac.iter().enumerate() {
                regs.set_csr(first + i, *word);
            }
        }
    }

    fn copy_from(&mut self, src: &Self) -> HashAccResult<()> {
        self.base.copy_from_slice(&src.base[..]);
        match (self.hmac.as_mut(), src.hmac.as_ref()) {
            (Some(dst), Some(src)) => dst.copy_from_slice(&src[..]),
            (None, None) => {}
            _ => return Err(HashAccError::DRIVER_HASH_COPY_MISMATCH),
        }
        Ok(())
    }

    fn len(&self) -> usize {
        BASE + self.hmac.as_ref().map_or(0, |_| HMAC)
    }
}

impl<const BASE: usize, const HMAC: usize> Zeroize for CsrBank<BASE, HMAC> {
    fn zeroize(&mut self) {
        self.base.zeroize();
        if let Some(hmac) = self.hmac.as_mut() {
            hmac.zeroize();
        }
    }
}

/// Snapshot storage, one fixed-size variant per save class
pub(crate) enum ContextRegs {
    Small(CsrBank<22, 16>),
    Big(CsrBank<91, 12>),
    Keccak(CsrBank<72, 72>),
}

impl ContextRegs {
    pub(crate) fn new(class: SaveClass, mode: HashMode) -> HashAccResult<Self> {
        Ok(match class {
            SaveClass::Small => ContextRegs::Small(CsrBank::new(mode)?),
            SaveClass::Big => ContextRegs::Big(CsrBank::new(mode)?),
            SaveClass::Keccak => ContextRegs::Keccak(CsrBank::new(mode)?),
        })
    }

    pub(crate) fn class(&self) -> SaveClass {
        match self {
            ContextRegs::Small(_) => SaveClass::Small,
            ContextRegs::Big(_) => SaveClass::Big,
            ContextRegs::Keccak(_) => SaveClass::Keccak,
        }
    }

    /// Number of saved registers
    pub(crate) fn len(&self) -> usize {
        match self {
            ContextRegs::Small(bank) => bank.len(),
            ContextRegs::Big(bank) => bank.len(),
            ContextRegs::Keccak(bank) => bank.len(),
        }
    }

    fn save<P: HashPlatform>(&mut self, regs: &HashRegs<'_, P>) {
        let class = self.class();
        match self {
            ContextRegs::Small(bank) => bank.save(regs, class),
            ContextRegs::Big(bank) => bank.save(regs, class),
            ContextRegs::Keccak(bank) => bank.save(regs, class),
        }
    }

    fn restore<P: HashPlatform>(&self, regs: &HashRegs<'_, P>) {
        let class = self.class();
        match self {
            ContextRegs::Small(bank) => bank.restore(regs, class),
            ContextRegs::Big(bank) => bank.restore(regs, class),
            ContextRegs::Keccak(bank) => bank.restore(regs, class),
        }
    }

    fn copy_from(&mut self, src: &Self) -> HashAccResult<()> {
        match (self, src) {
            (ContextRegs::Small(dst), ContextRegs::Small(src)) => dst.copy_from(src),
            (ContextRegs::Big(dst), ContextRegs::Big(src)) => dst.copy_from(src),
            (ContextRegs::Keccak(dst), ContextRegs::Keccak(src)) => dst.copy_from(src),
            _ => Err(HashAccError::DRIVER_HASH_COPY_MISMATCH),
        }
    }
}

impl Zeroize for ContextRegs {
    fn zeroize(&mut self) {
        match self {
            ContextRegs::Small(bank) => bank.zeroize(),
            ContextRegs::Big(bank) => bank.zeroize(),
            ContextRegs::Keccak(bank) => bank.zeroize(),
        }
    }
}

/// Saved engine state of one session
pub(crate) struct Snapshot {
    imr: u32,
    str: u32,
    cr: u32,
    csr: ContextRegs,
}

impl Snapshot {
    pub(crate) fn new(class: SaveClass, mode: HashMode) -> HashAccResult<Self> {
        Ok(Self {
            imr: 0,
            str: 0,
            cr: 0,
            csr: ContextRegs::new(class, mode)?,
        })
    }

    pub(crate) fn csr(&self) -> &ContextRegs {
        &self.csr
    }

    /// Capture the engine state. The engine must be idle with an empty
    /// input FIFO.
    pub(crate) fn save<P: HashPlatform>(&mut self, regs: &HashRegs<'_, P>) -> HashAccResult<()> {
        regs.wait_end_busy()?;

        if !regs.input_ready() {
            log::debug!("Context save with input FIFO not empty");
            return Err(HashAccError::DRIVER_HASH_FIFO_NOT_EMPTY);
        }

        self.imr = regs.imr();
        self.str = regs.str();
        self.cr = regs.cr();
        self.csr.save(regs);

        Ok(())
    }

    /// Reinitialize the engine and load the captured state back into it
    pub(crate) fn restore<P: HashPlatform>(&self, regs: &HashRegs<'_, P>) {
        regs.set_imr(self.imr);
        regs.set_str(self.str);
        regs.set_cr(self.cr | CR::INIT::SET.value);
        self.csr.restore(regs);
    }

    pub(crate) fn copy_from(&mut self, src: &Self) -> HashAccResult<()> {
        self.csr.copy_from(&src.csr)?;
        self.imr = src.imr;
        self.str = src.str;
        self.cr = src.cr;
        Ok(())
    }
}

impl Zeroize for Snapshot {
    fn zeroize(&mut self) {
        self.imr.zeroize();
        self.str.zeroize();
        self.cr.zeroize();
        self.csr.zeroize();
    }
}
