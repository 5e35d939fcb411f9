/*++

Licensed under the Apache-2.0 license.

File Name:

    sha256.rs

Abstract:

    File contains the SHA-224/SHA-256 block compressor of the emulated engine.

--*/

use sha2::digest::block_buffer::Block;
use sha2::digest::consts::U64;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Sha256Mode {
    Sha224,
    Sha256,
}

impl Sha256Mode {
    fn iv(self) -> [u32; 8] {
        match self {
            Sha256Mode::Sha224 => [
                0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511,
                0x64f98fa7, 0xbefa4fa4,
            ],
            Sha256Mode::Sha256 => [
                0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c,
                0x1f83d9ab, 0x5be0cd19,
            ],
        }
    }

    /// Digest length in bytes
    pub fn hash_len(self) -> usize {
        match self {
            Sha256Mode::Sha224 => 28,
            Sha256Mode::Sha256 => 32,
        }
    }
}

/// SHA-224/SHA-256 chaining state, fed one block at a time
#[derive(Debug, Clone)]
pub struct Sha256 {
    state: [u32; 8],
    mode: Sha256Mode,
}

impl Sha256 {
    pub const BLOCK_SIZE: usize = 64;

    /// Number of 32-bit words of chaining state
    pub const STATE_WORDS: usize = 8;

    pub fn new(mode: Sha256Mode) -> Self {
        Self {
            state: mode.iv(),
            mode,
        }
    }

    /// Rebuild the compressor from saved chaining words
    pub fn from_words(mode: Sha256Mode, words: &[u32]) -> Self {
        let mut state = [0u32; 8];
        state.iter_mut().zip(words).for_each(|(s, w)| *s = *w);
        Self { state, mode }
    }

    pub fn to_words(&self, words: &mut [u32]) {
        words.iter_mut().zip(self.state).for_each(|(w, s)| *w = s);
    }

    pub fn update(&mut self, block: &[u8; Self::BLOCK_SIZE]) {
        let block = *Block::<U64>::from_slice(block);
        sha2::compress256(&mut self.state, &[block]);
    }

    /// Copy out the digest, big-endian words truncated to the mode's length
    pub fn hash(&self, hash: &mut [u8]) {
        self.state
            .iter()
            .flat_map(|w| w.to_be_bytes())
            .take(self.mode.hash_len())
            .zip(hash)
            .for_each(|(src, dest)| *dest = src);
    }
}
