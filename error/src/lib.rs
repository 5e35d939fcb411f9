/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains API and macros used by the hash accelerator crates for
    error handling

--*/
#![cfg_attr(not(any(test, feature = "std")), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Hash accelerator error type
/// Derives debug, copy, clone, eq, and partial eq
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HashAccError(pub NonZeroU32);

/// Error taxonomy. Every error code belongs to exactly one kind, encoded in
/// the upper 16 bits of the code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed caller input
    BadParameters,

    /// Hardware or session invariants violated
    BadState,

    /// A bounded hardware wait timed out
    Busy,

    /// Buffer or snapshot allocation failed
    OutOfMemory,

    /// Algorithm unsupported by the chip, or driver not brought up
    NotImplemented,

    /// Irrecoverable bring-up failure
    Fatal,
}

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: HashAccError = HashAccError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl HashAccError {
    const KIND_BAD_PARAMETERS: u32 = 0x0001;
    const KIND_BAD_STATE: u32 = 0x0002;
    const KIND_BUSY: u32 = 0x0003;
    const KIND_OUT_OF_MEMORY: u32 = 0x0004;
    const KIND_NOT_IMPLEMENTED: u32 = 0x0005;

    /// Create an error; intended to only be used from const contexts, as we
    /// don't want runtime panics if val is zero. The preferred way to get a
    /// HashAccError from a u32 is to use `HashAccError::try_from()`.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("HashAccError cannot be 0"),
        }
    }

    /// Returns the taxonomy class of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self.0.get() >> 16 {
            Self::KIND_BAD_PARAMETERS => ErrorKind::BadParameters,
            Self::KIND_BAD_STATE => ErrorKind::BadState,
            Self::KIND_BUSY => ErrorKind::Busy,
            Self::KIND_OUT_OF_MEMORY => ErrorKind::OutOfMemory,
            Self::KIND_NOT_IMPLEMENTED => ErrorKind::NotImplemented,
            _ => ErrorKind::Fatal,
        }
    }

    define_error_constants![
        (
            DRIVER_HASH_HMAC_KEY_MISSING,
            0x0001_0001,
            "HMAC session initialized without a key"
        ),
        (
            DRIVER_HASH_COPY_MISMATCH,
            0x0001_0002,
            "Duplicate source and destination differ in mode or algorithm"
        ),
        (
            DRIVER_HASH_DIGEST_BUFFER_TOO_SMALL,
            0x0001_0003,
            "Digest output buffer shorter than the digest size"
        ),
        (
            DRIVER_HASH_FIFO_NOT_EMPTY,
            0x0002_0001,
            "Context save attempted while the input FIFO holds data"
        ),
        (
            DRIVER_HASH_PENDING_OVERFLOW,
            0x0002_0002,
            "Pending buffer cannot hold the queued bytes"
        ),
        (
            DRIVER_HASH_INVALID_STATE,
            0x0002_0003,
            "Session is not initialized, already finalized or faulted"
        ),
        (
            DRIVER_HASH_FINAL_KEY_MISSING,
            0x0002_0004,
            "HMAC session finalized without a key"
        ),
        (
            DRIVER_HASH_INPUT_UNDERRUN,
            0x0002_0005,
            "Engine expects another word but less than a word of input remains"
        ),
        (
            DRIVER_HASH_BUSY_TIMEOUT,
            0x0003_0001,
            "Engine busy flag did not clear in time"
        ),
        (
            DRIVER_HASH_DIGEST_TIMEOUT,
            0x0003_0002,
            "Digest calculation did not complete in time"
        ),
        (
            DRIVER_HASH_OUT_OF_MEMORY,
            0x0004_0001,
            "Pending buffer or context snapshot allocation failed"
        ),
        (
            DRIVER_HASH_ALGO_NOT_SUPPORTED,
            0x0005_0001,
            "Algorithm not fused on this chip"
        ),
        (
            DRIVER_HASH_NOT_PROBED,
            0x0005_0002,
            "Hash engine has not been brought up"
        ),
        (
            DRIVER_HASH_MODE_DISABLED,
            0x0005_0003,
            "Hash or HMAC service disabled in this build"
        ),
        (
            DRIVER_HASH_RESET_FAILED,
            0x0006_0001,
            "Engine reset line did not settle"
        ),
    ];
}

impl From<core::num::NonZeroU32> for crate::HashAccError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::HashAccError(val)
    }
}

impl From<HashAccError> for core::num::NonZeroU32 {
    fn from(val: HashAccError) -> Self {
        val.0
    }
}

impl From<HashAccError> for u32 {
    fn from(val: HashAccError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for HashAccError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(HashAccError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type HashAccResult<T> = Result<T, HashAccError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_try_from() {
        assert!(HashAccError::try_from(0).is_err());
        assert_eq!(
            Ok(HashAccError::DRIVER_HASH_FIFO_NOT_EMPTY),
            HashAccError::try_from(0x0002_0001)
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            HashAccError::DRIVER_HASH_HMAC_KEY_MISSING.kind(),
            ErrorKind::BadParameters
        );
        assert_eq!(
            HashAccError::DRIVER_HASH_FINAL_KEY_MISSING.kind(),
            ErrorKind::BadState
        );
        assert_eq!(HashAccError::DRIVER_HASH_BUSY_TIMEOUT.kind(), ErrorKind::Busy);
        assert_eq!(
            HashAccError::DRIVER_HASH_OUT_OF_MEMORY.kind(),
            ErrorKind::OutOfMemory
        );
        assert_eq!(
            HashAccError::DRIVER_HASH_NOT_PROBED.kind(),
            ErrorKind::NotImplemented
        );
        assert_eq!(HashAccError::DRIVER_HASH_RESET_FAILED.kind(), ErrorKind::Fatal);
    }

    #[test]
    fn test_error_constants_uniqueness() {
        let constants = HashAccError::all_constants();
        let mut error_values = HashSet::new();
        let mut duplicates = Vec::new();

        for (name, value) in constants {
            if !error_values.insert(value) {
                duplicates.push((name, value));
            }
        }

        assert!(
            duplicates.is_empty(),
            "Found duplicate error codes: {:?}",
            duplicates
        );
    }
}
