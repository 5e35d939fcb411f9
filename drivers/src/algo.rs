/*++

Licensed under the Apache-2.0 license.

File Name:

    algo.rs

Abstract:

    File contains the algorithm table: digest sizes, block sizes, context
    save classes, capability bits and control register selectors.

--*/

use bitflags::bitflags;
use hashacc_registers::CR;

bitflags! {
    /// Algorithms an engine instance implements
    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    pub struct Capabilities: u32 {
        const MD5 = 1 << 0;
        const SHA1 = 1 << 1;
        const SHA2_224 = 1 << 2;
        const SHA2_256 = 1 << 3;
        const SHA2_384 = 1 << 4;
        const SHA2_512 = 1 << 5;
        const SHA3 = 1 << 6;
    }
}

/// Plain digest or keyed HMAC
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HashMode {
    Hash,
    Hmac,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

/// Layout of the context swap registers that hold an algorithm family's
/// internal state
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SaveClass {
    /// MD5, SHA-1, SHA-224, SHA-256
    Small,

    /// SHA-384, SHA-512
    Big,

    /// SHA-3 family
    Keccak,
}

impl SaveClass {
    /// First register and register count of the base range
    pub const fn base_range(self) -> (usize, usize) {
        match self {
            SaveClass::Small => (0, 22),
            SaveClass::Big => (0, 91),
            SaveClass::Keccak => (0, 72),
        }
    }

    /// First register and register count of the extra HMAC range
    pub const fn hmac_range(self) -> (usize, usize) {
        match self {
            SaveClass::Small => (38, 16),
            SaveClass::Big => (91, 12),
            SaveClass::Keccak => (16, 72),
        }
    }
}

struct AlgoParams {
    digest_words: usize,
    block_size: usize,
    save_class: SaveClass,
    capability: Capabilities,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 10] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
    ];

    const fn params(self) -> AlgoParams {
        let (digest_words, block_size, save_class, capability) = match self {
            HashAlgorithm::Md5 => (4, 64, SaveClass::Small, Capabilities::MD5),
            HashAlgorithm::Sha1 => (5, 64, SaveClass::Small, Capabilities::SHA1),
            HashAlgorithm::Sha224 => (7, 64, SaveClass::Small, Capabilities::SHA2_224),
            HashAlgorithm::Sha256 => (8, 64, SaveClass::Small, Capabilities::SHA2_256),
            HashAlgorithm::Sha384 => (12, 128, SaveClass::Big, Capabilities::SHA2_384),
            HashAlgorithm::Sha512 => (16, 128, SaveClass::Big, Capabilities::SHA2_512),
            HashAlgorithm::Sha3_224 => (7, 144, SaveClass::Keccak, Capabilities::SHA3),
            HashAlgorithm::Sha3_256 => (8, 136, SaveClass::Keccak, Capabilities::SHA3),
            HashAlgorithm::Sha3_384 => (12, 104, SaveClass::Keccak, Capabilities::SHA3),
            HashAlgorithm::Sha3_512 => (16, 72, SaveClass::Keccak, Capabilities::SHA3),
        };
        AlgoParams {
            digest_words,
            block_size,
            save_class,
            capability,
        }
    }

    /// Digest length in 32-bit words
    pub const fn digest_words(self) -> usize {
        self.params().digest_words
    }

    /// Digest length in bytes
    pub const fn digest_size(self) -> usize {
        self.params().digest_words * 4
    }

    /// Engine block size in bytes
    pub const fn block_size(self) -> usize {
        self.params().block_size
    }

    pub const fn save_class(self) -> SaveClass {
        self.params().save_class
    }

    /// Capability bit the engine must advertise for this algorithm
    pub const fn capability(self) -> Capabilities {
        self.params().capability
    }

    /// Control register algorithm selector bits
    ///
    /// # Arguments
    ///
    /// * `caps` - Capabilities of the engine being programmed
    pub fn selector(self, caps: Capabilities) -> u32 {
        match self {
            HashAlgorithm::Md5 => CR::ALGO_MD5::SET.value,
            HashAlgorithm::Sha1 => CR::ALGO::Sha1.value,
            HashAlgorithm::Sha224 => CR::ALGO::Sha224.value,
            // MD5-capable engines decode bit 17 differently.
            HashAlgorithm::Sha256 if caps.contains(Capabilities::MD5) => {
                (CR::ALGO::Sha224 + CR::ALGO_MD5::SET).value
            }
            HashAlgorithm::Sha256 => CR::ALGO::Sha256.value,
            HashAlgorithm::Sha384 => CR::ALGO::Sha384.value,
            HashAlgorithm::Sha512 => CR::ALGO::Sha512.value,
            HashAlgorithm::Sha3_224 => CR::ALGO::Sha3_224.value,
            HashAlgorithm::Sha3_256 => CR::ALGO::Sha3_256.value,
            HashAlgorithm::Sha3_384 => CR::ALGO::Sha3_384.value,
            HashAlgorithm::Sha3_512 => CR::ALGO::Sha3_512.value,
        }
    }
}
