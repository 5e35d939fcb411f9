// Licensed under the Apache-2.0 license

use std::sync::{Mutex, MutexGuard};

use hashacc_registers::Mmio;

use crate::{Bus, RvSize};

/// An MMIO implementation that reads and writes to a `hashacc_emu_bus::Bus`.
pub struct BusMmio<TBus: Bus> {
    bus: Mutex<TBus>,
}

impl<TBus: Bus> BusMmio<TBus> {
    pub fn new(bus: TBus) -> Self {
        Self {
            bus: Mutex::new(bus),
        }
    }

    pub fn into_inner(self) -> TBus {
        self.bus.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    /// Borrow the bus outside of a register access.
    pub fn bus(&self) -> MutexGuard<'_, TBus> {
        self.bus.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<TBus: Bus> Mmio for BusMmio<TBus> {
    /// Loads the word at `offset` from the bus.
    ///
    /// # Panics
    ///
    /// This function panics if the bus faults.
    fn read32(&self, offset: u32) -> u32 {
        self.bus().read(RvSize::Word, offset).unwrap()
    }

    /// Stores `val` at `offset` on the bus.
    ///
    /// # Panics
    ///
    /// This function panics if the bus faults.
    fn write32(&self, offset: u32, val: u32) {
        self.bus().write(RvSize::Word, offset, val).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BusError, RvAddr, RvData};

    struct Words(Vec<u32>);

    impl Bus for Words {
        fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
            if size != RvSize::Word || addr % 4 != 0 {
                return Err(BusError::LoadAddrMisaligned);
            }
            self.0
                .get(addr as usize / 4)
                .copied()
                .ok_or(BusError::LoadAccessFault)
        }

        fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
            if size != RvSize::Word || addr % 4 != 0 {
                return Err(BusError::StoreAddrMisaligned);
            }
            let slot = self
                .0
                .get_mut(addr as usize / 4)
                .ok_or(BusError::StoreAccessFault)?;
            *slot = val;
            Ok(())
        }
    }

    #[test]
    fn test_bus_mmio() {
        let mmio = BusMmio::new(Words(vec![0u32; 3]));
        mmio.write32(4, 0x3abc_9321);
        mmio.clrsetbits32(4, 0xff00, 0x4400);
        mmio.write32(8, 0x39af);

        assert_eq!(mmio.read32(4), 0x3abc_4421);
        assert_eq!(mmio.read32(8), 0x39af);
        assert_eq!(mmio.bus().0[1], 0x3abc_4421);
        assert_eq!(mmio.into_inner().0, vec![0, 0x3abc_4421, 0x39af]);
    }

    #[test]
    #[should_panic]
    fn test_bus_mmio_fault_panics() {
        let mmio = BusMmio::new(Words(vec![0u32; 1]));
        mmio.read32(0x40);
    }
}
