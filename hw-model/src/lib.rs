/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the emulated platform used to run the hash driver
    against the software model of the engine.

--*/

mod model_emulated;

pub use model_emulated::{EmulatedBus, ModelEmulated};
