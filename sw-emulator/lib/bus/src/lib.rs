/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the hash accelerator emulator bus library.

--*/
mod bus;
mod mmio;

pub use crate::bus::{Bus, BusError, RvAddr, RvData, RvSize};
pub use crate::mmio::BusMmio;
