/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the hash accelerator emulator peripheral library.

--*/
mod hash_hmac;

pub use hash_hmac::{HashPeriph, SelectorEncoding};
