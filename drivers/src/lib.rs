/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the hash/HMAC accelerator driver.

--*/

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod algo;
mod context;
mod digest;
mod engine;
mod queue;
mod regs;
mod session;
mod wait;
mod words;

pub use algo::{Capabilities, HashAlgorithm, HashMode, SaveClass};
pub use engine::{
    HashCompat, HashDriver, HashEngine, HashPlatform, HASH_TIMEOUT_US, RESET_TIMEOUT_US,
};
pub use hashacc_error::{ErrorKind, HashAccError, HashAccResult};
pub use session::HashSession;
pub use wait::{until_timeout, PollResult};
