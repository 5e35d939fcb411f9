/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the register map of the hash/HMAC engine: register
    offsets, bitfield definitions and the MMIO access trait shared by the
    driver and the software emulator.

--*/
#![no_std]

mod mmio;

pub use mmio::{Mmio, RealMmio};

use tock_registers::register_bitfields;

/// Control register
pub const HASH_CR: u32 = 0x00;

/// Data input register
pub const HASH_DIN: u32 = 0x04;

/// Start (stream control) register
pub const HASH_STR: u32 = 0x08;

/// Interrupt mask register
pub const HASH_IMR: u32 = 0x20;

/// Status register
pub const HASH_SR: u32 = 0x24;

/// Version register
pub const HASH_VERR: u32 = 0x3F4;

/// First digest output register
pub const HASH_HR_BASE: u32 = 0x310;

/// First context swap register
pub const HASH_CSR_BASE: u32 = 0xF8;

/// Number of digest output registers
pub const HASH_HR_COUNT: usize = 16;

/// Number of context swap registers
pub const HASH_CSR_COUNT: usize = 103;

/// Offset of digest output register `idx`
pub const fn hash_hr(idx: usize) -> u32 {
    HASH_HR_BASE + (idx as u32) * 4
}

/// Offset of context swap register `idx`
pub const fn hash_csr(idx: usize) -> u32 {
    HASH_CSR_BASE + (idx as u32) * 4
}

register_bitfields! [
    u32,

    /// Control Register Fields
    pub CR [
        INIT OFFSET(2) NUMBITS(1) [],
        DATATYPE OFFSET(4) NUMBITS(2) [
            NoSwap = 0,
            HalfWord = 1,
            Byte = 2,
            Bit = 3,
        ],
        MODE OFFSET(6) NUMBITS(1) [
            Hash = 0,
            Hmac = 1,
        ],
        ALGO_MD5 OFFSET(7) NUMBITS(1) [],
        LKEY OFFSET(16) NUMBITS(1) [],
        ALGO OFFSET(17) NUMBITS(4) [
            Sha1 = 0x0,
            Sha224 = 0x2,
            Sha256 = 0x3,
            Sha3_224 = 0x4,
            Sha3_256 = 0x5,
            Sha3_384 = 0x6,
            Sha3_512 = 0x7,
            Shake128 = 0x8,
            Shake256 = 0x9,
            RawShake128 = 0xA,
            RawShake256 = 0xB,
            Sha384 = 0xC,
            Sha512_224 = 0xD,
            Sha512_256 = 0xE,
            Sha512 = 0xF,
        ],
    ],

    /// Start Register Fields
    pub STR [
        NBLW OFFSET(0) NUMBITS(5) [],
        DCAL OFFSET(8) NUMBITS(1) [],
    ],

    /// Status Register Fields
    pub SR [
        DINIS OFFSET(0) NUMBITS(1) [],
        DCIS OFFSET(1) NUMBITS(1) [],
        BUSY OFFSET(3) NUMBITS(1) [],
        NBWP OFFSET(9) NUMBITS(5) [],
        NBWE OFFSET(16) NUMBITS(6) [],
    ],

    /// Version Register Fields
    pub VERR [
        MINREV OFFSET(0) NUMBITS(4) [],
        MAJREV OFFSET(4) NUMBITS(4) [],
    ],
];
