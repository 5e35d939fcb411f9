// Licensed under the Apache-2.0 license

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use hashacc_drivers::{HashCompat, HashPlatform};
use hashacc_emu_bus::{Bus, BusError, BusMmio, RvAddr, RvData, RvSize};
use hashacc_emu_periph::{HashPeriph, SelectorEncoding};
use hashacc_error::{HashAccError, HashAccResult};

/// Engine version reported by the modelled STM32MP13 (2.3)
const VERSION_MP13: u32 = 0x23;

/// Engine version reported by the modelled STM32MP15 (1.1)
const VERSION_MP15: u32 = 0x11;

/// Register bus of the engine behind its clock gate
pub struct EmulatedBus {
    periph: HashPeriph,
    clk_refs: u32,
    clk_enables: u64,
    accesses: u64,
    ungated_accesses: u64,
}

impl EmulatedBus {
    fn new(periph: HashPeriph) -> Self {
        Self {
            periph,
            clk_refs: 0,
            clk_enables: 0,
            accesses: 0,
            ungated_accesses: 0,
        }
    }

    fn record_access(&mut self) {
        self.accesses += 1;
        if self.clk_refs == 0 {
            self.ungated_accesses += 1;
        }
    }

    pub fn periph(&mut self) -> &mut HashPeriph {
        &mut self.periph
    }
}

impl Bus for EmulatedBus {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        self.record_access();
        self.periph.read(size, addr)
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        self.record_access();
        self.periph.write(size, addr, val)
    }
}

/// Emulated board: engine model, clock gate, reset line and a microsecond
/// timer that advances on every read
pub struct ModelEmulated {
    mmio: BusMmio<EmulatedBus>,
    time_us: AtomicU64,
    reset_fault: AtomicBool,
    compat: HashCompat,
}

impl ModelEmulated {
    /// Model of the extended engine (SHA-1, SHA-2, SHA-3)
    pub fn stm32mp13() -> Self {
        Self::new(
            HashPeriph::new(SelectorEncoding::Extended, VERSION_MP13),
            HashCompat::STM32MP13,
        )
    }

    /// Model of the MD5-capable engine (MD5, SHA-1, SHA-224, SHA-256)
    pub fn stm32mp15() -> Self {
        Self::new(
            HashPeriph::new(SelectorEncoding::Legacy, VERSION_MP15),
            HashCompat::STM32MP15,
        )
    }

    fn new(periph: HashPeriph, compat: HashCompat) -> Self {
        Self {
            mmio: BusMmio::new(EmulatedBus::new(periph)),
            time_us: AtomicU64::new(0),
            reset_fault: AtomicBool::new(false),
            compat,
        }
    }

    /// Capability table matching the modelled chip
    pub fn compat(&self) -> HashCompat {
        self.compat
    }

    /// Make the next reset line transition fail
    pub fn set_reset_fault(&self, fault: bool) {
        self.reset_fault.store(fault, Ordering::Relaxed);
    }

    /// Hold the engine's BUSY flag set
    pub fn set_stuck_busy(&self, stuck: bool) {
        self.mmio.bus().periph().set_stuck_busy(stuck);
    }

    /// Run `f` against the engine model
    pub fn with_periph<R>(&self, f: impl FnOnce(&mut HashPeriph) -> R) -> R {
        f(self.mmio.bus().periph())
    }

    /// The clock is currently ungated
    pub fn clock_enabled(&self) -> bool {
        self.mmio.bus().clk_refs > 0
    }

    /// Number of times the clock has been ungated
    pub fn clock_enables(&self) -> u64 {
        self.mmio.bus().clk_enables
    }

    /// Register accesses seen so far
    pub fn accesses(&self) -> u64 {
        self.mmio.bus().accesses
    }

    /// Register accesses made while the clock was gated
    pub fn ungated_accesses(&self) -> u64 {
        self.mmio.bus().ungated_accesses
    }

    fn toggle_reset(&self, assert: bool) -> HashAccResult<()> {
        if self.reset_fault.load(Ordering::Relaxed) {
            return Err(HashAccError::DRIVER_HASH_RESET_FAILED);
        }
        if assert {
            self.mmio.bus().periph().reset();
        }
        Ok(())
    }
}

impl HashPlatform for ModelEmulated {
    type Mmio = BusMmio<EmulatedBus>;

    fn mmio(&self) -> &Self::Mmio {
        &self.mmio
    }

    fn clk_enable(&self) {
        let mut bus = self.mmio.bus();
        bus.clk_refs += 1;
        bus.clk_enables += 1;
    }

    fn clk_disable(&self) {
        let mut bus = self.mmio.bus();
        bus.clk_refs = bus.clk_refs.saturating_sub(1);
    }

    fn reset_assert(&self, _timeout_us: u64) -> HashAccResult<()> {
        self.toggle_reset(true)
    }

    fn reset_deassert(&self, _timeout_us: u64) -> HashAccResult<()> {
        self.toggle_reset(false)
    }

    fn now_us(&self) -> u64 {
        self.time_us.fetch_add(1, Ordering::Relaxed)
    }
}
