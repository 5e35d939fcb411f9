/*++

Licensed under the Apache-2.0 license.

File Name:

    sha512.rs

Abstract:

    File contains implementation of Secure Hash 512 Algorithm (SHA-512)

--*/

use sha2::digest::block_buffer::Block;
use sha2::digest::consts::U128;

/// SHA-512 Mode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Sha512Mode {
    Sha384,
    Sha512,
}

/// SHA-512
#[derive(Debug, Clone)]
pub struct Sha512 {
    /// Hash
    hash: [u64; 8],

    /// SHA 512 Mode
    mode: Sha512Mode,
}

impl Sha512 {
    /// SHA-512 Block Size
    pub const BLOCK_SIZE: usize = 128;

    /// Number of 32-bit words of chaining state
    pub const STATE_WORDS: usize = 16;

    /// SHA-384 Initial Hash Vectors
    const HASH_IV_384: [u64; 8] = [
        0xcbbb9d5dc1059ed8,
        0x629a292a367cd507,
        0x9159015a3070dd17,
        0x152fecd8f70e5939,
        0x67332667ffc00b31,
        0x8eb44a8768581511,
        0xdb0c2e0d64f98fa7,
        0x47b5481dbefa4fa4,
    ];

    /// SHA-512 Initial Hash Vectors
    const HASH_IV_512: [u64; 8] = [
        0x6a09e667f3bcc908,
        0xbb67ae8584caa73b,
        0x3c6ef372fe94f82b,
        0xa54ff53a5f1d36f1,
        0x510e527fade682d1,
        0x9b05688c2b3e6c1f,
        0x1f83d9abfb41bd6b,
        0x5be0cd19137e2179,
    ];

    /// Create a new instance of Secure Hash Algorithm object
    ///
    /// # Arguments
    ///
    /// * `mode` - Mode of the SHA Operation
    pub fn new(mode: Sha512Mode) -> Self {
        let hash = match mode {
            Sha512Mode::Sha384 => Self::HASH_IV_384,
            Sha512Mode::Sha512 => Self::HASH_IV_512,
        };
        Self { hash, mode }
    }

    /// Rebuild an engine from saved chaining words, low half first
    pub fn from_words(mode: Sha512Mode, words: &[u32]) -> Self {
        let mut hash = [0u64; 8];
        hash.iter_mut()
            .zip(words.chunks_exact(2))
            .for_each(|(h, w)| *h = u64::from(w[0]) | (u64::from(w[1]) << 32));
        Self { hash, mode }
    }

    /// Export the chaining words, low half first
    pub fn to_words(&self, words: &mut [u32]) {
        words
            .iter_mut()
            .zip(self.hash.iter().flat_map(|h| [*h as u32, (*h >> 32) as u32]))
            .for_each(|(w, h)| *w = h);
    }

    /// Update the hash
    ///
    /// # Arguments
    ///
    /// * `block` - Block to compress
    pub fn update(&mut self, block: &[u8; Self::BLOCK_SIZE]) {
        let block = *Block::<U128>::from_slice(block);
        sha2::compress512(&mut self.hash, &[block]);
    }

    /// Retrieve the hash
    ///
    /// # Arguments
    ///
    /// * `hash` - Hash to copy
    pub fn hash(&self, hash: &mut [u8]) {
        self.hash
            .iter()
            .flat_map(|i| i.to_be_bytes())
            .take(self.hash_len())
            .zip(hash)
            .for_each(|(src, dest)| *dest = src);
    }

    /// Get the length of the hash
    pub fn hash_len(&self) -> usize {
        match self.mode {
            Sha512Mode::Sha384 => 48,
            Sha512Mode::Sha512 => 64,
        }
    }
}
