/*++

Licensed under the Apache-2.0 license.

File Name:

    engine.rs

Abstract:

    File contains the shared engine instance: platform hooks, chip
    capability tables, bring-up and the locked hardware access guard.

--*/

use hashacc_error::{HashAccError, HashAccResult};
use hashacc_registers::{Mmio, HASH_VERR, VERR};
use spin::{Mutex, MutexGuard};
use tock_registers::LocalRegisterCopy;

use crate::algo::{Capabilities, HashAlgorithm, HashMode};
use crate::regs::HashRegs;
use crate::session::HashSession;

/// Bound on every busy and digest-ready wait, in microseconds
pub const HASH_TIMEOUT_US: u64 = 10_000;

/// Bound on each reset line transition, in microseconds
pub const RESET_TIMEOUT_US: u64 = 1_000;

/// Board services the engine depends on
pub trait HashPlatform {
    type Mmio: Mmio;

    /// Register window of the engine
    fn mmio(&self) -> &Self::Mmio;

    /// Ungate the engine clock
    fn clk_enable(&self);

    /// Gate the engine clock
    fn clk_disable(&self);

    /// Assert the engine reset line
    fn reset_assert(&self, timeout_us: u64) -> HashAccResult<()>;

    /// Release the engine reset line
    fn reset_deassert(&self, timeout_us: u64) -> HashAccResult<()>;

    /// Monotonic time in microseconds
    fn now_us(&self) -> u64;
}

/// Per-chip configuration
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HashCompat {
    pub caps: Capabilities,
}

impl HashCompat {
    pub const STM32MP13: Self = Self {
        caps: Capabilities::SHA1
            .union(Capabilities::SHA2_224)
            .union(Capabilities::SHA2_256)
            .union(Capabilities::SHA2_384)
            .union(Capabilities::SHA2_512)
            .union(Capabilities::SHA3),
    };

    pub const STM32MP15: Self = Self {
        caps: Capabilities::MD5
            .union(Capabilities::SHA1)
            .union(Capabilities::SHA2_224)
            .union(Capabilities::SHA2_256),
    };
}

/// The single hash engine shared by every session
pub struct HashEngine<P: HashPlatform> {
    platform: P,
    caps: Capabilities,
    lock: Mutex<()>,
}

impl<P: HashPlatform> HashEngine<P> {
    /// Bring the engine up: report its version and pulse its reset line
    ///
    /// # Panics
    ///
    /// Panics if the reset line cannot be toggled; an engine in an unknown
    /// reset state cannot be used.
    pub fn probe(platform: P, compat: HashCompat) -> Self {
        platform.clk_enable();

        let version = LocalRegisterCopy::<u32, VERR::Register>::new(platform.mmio().read32(HASH_VERR));
        log::info!(
            "HASH v{}.{}",
            version.read(VERR::MAJREV),
            version.read(VERR::MINREV)
        );

        let reset = platform
            .reset_assert(RESET_TIMEOUT_US)
            .and_then(|_| platform.reset_deassert(RESET_TIMEOUT_US));
        if let Err(err) = reset {
            log::error!("HASH reset failed: {:#x}", u32::from(err));
            panic!("hash engine reset failed");
        }

        platform.clk_disable();

        Self {
            platform,
            caps: compat.caps,
            lock: Mutex::new(()),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Bind a new session to this engine
    ///
    /// # Arguments
    ///
    /// * `mode` - Plain digest or HMAC
    /// * `algo` - Digest algorithm
    pub fn alloc(&self, mode: HashMode, algo: HashAlgorithm) -> HashAccResult<HashSession<'_, P>> {
        let enabled = match mode {
            HashMode::Hash => cfg!(feature = "hash"),
            HashMode::Hmac => cfg!(feature = "hmac"),
        };
        if !enabled {
            return Err(HashAccError::DRIVER_HASH_MODE_DISABLED);
        }
        if !self.caps.contains(algo.capability()) {
            return Err(HashAccError::DRIVER_HASH_ALGO_NOT_SUPPORTED);
        }
        HashSession::new(self, mode, algo)
    }

    /// Take the engine lock and ungate the clock until the guard drops
    pub(crate) fn access(&self) -> HwAccess<'_, P> {
        let guard = self.lock.lock();
        self.platform.clk_enable();
        HwAccess {
            platform: &self.platform,
            _guard: guard,
        }
    }
}

/// Exclusive, clocked access to the engine registers
pub(crate) struct HwAccess<'e, P: HashPlatform> {
    platform: &'e P,
    _guard: MutexGuard<'e, ()>,
}

impl<P: HashPlatform> HwAccess<'_, P> {
    pub(crate) fn regs(&self) -> HashRegs<'_, P> {
        HashRegs::new(self.platform)
    }
}

impl<P: HashPlatform> Drop for HwAccess<'_, P> {
    fn drop(&mut self) {
        // Runs before `_guard` is dropped, so the clock is gated under the lock.
        self.platform.clk_disable();
    }
}

/// Driver slot that holds the engine once it has been brought up
pub struct HashDriver<P: HashPlatform> {
    engine: Option<HashEngine<P>>,
}

impl<P: HashPlatform> Default for HashDriver<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: HashPlatform> HashDriver<P> {
    pub const fn new() -> Self {
        Self { engine: None }
    }

    /// Bring up the engine and install it
    pub fn probe(&mut self, platform: P, compat: HashCompat) -> &HashEngine<P> {
        self.engine.insert(HashEngine::probe(platform, compat))
    }

    pub fn engine(&self) -> Option<&HashEngine<P>> {
        self.engine.as_ref()
    }

    /// Bind a new session to the installed engine
    pub fn alloc(&self, mode: HashMode, algo: HashAlgorithm) -> HashAccResult<HashSession<'_, P>> {
        self.engine
            .as_ref()
            .ok_or(HashAccError::DRIVER_HASH_NOT_PROBED)?
            .alloc(mode, algo)
    }
}
