/*++

Licensed under the Apache-2.0 license.

File Name:

    sha1.rs

Abstract:

    File contains the SHA-1 block compressor of the emulated engine.

--*/

use ::sha1::digest::block_buffer::Block;
use ::sha1::digest::consts::U64;

/// SHA-1 chaining state, fed one block at a time
#[derive(Debug, Clone)]
pub struct Sha1 {
    state: [u32; 5],
}

impl Default for Sha1 {
    fn default() -> Self {
        Self { state: Self::IV }
    }
}

impl Sha1 {
    pub const BLOCK_SIZE: usize = 64;

    /// Number of 32-bit words of chaining state
    pub const STATE_WORDS: usize = 5;

    const IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

    /// Rebuild the compressor from saved chaining words
    pub fn from_words(words: &[u32]) -> Self {
        let mut state = [0u32; 5];
        state.iter_mut().zip(words).for_each(|(s, w)| *s = *w);
        Self { state }
    }

    pub fn to_words(&self, words: &mut [u32]) {
        words.iter_mut().zip(self.state).for_each(|(w, s)| *w = s);
    }

    pub fn update(&mut self, block: &[u8; Self::BLOCK_SIZE]) {
        let block = *Block::<U64>::from_slice(block);
        ::sha1::compress(&mut self.state, &[block]);
    }

    /// Copy out the digest, big-endian words
    pub fn hash(&self, hash: &mut [u8]) {
        self.state
            .iter()
            .flat_map(|w| w.to_be_bytes())
            .zip(hash)
            .for_each(|(src, dest)| *dest = src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_abc() {
        let mut block = [0u8; 64];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[63] = 0x18;

        let mut sha = Sha1::default();
        sha.update(&block);

        #[cfg_attr(rustfmt, rustfmt_skip)]
        let expected: [u8; 20] = [
            0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78, 0x50, 0xc2, 0x6c,
            0x9c, 0xd0, 0xd8, 0x9d,
        ];

        let mut hash = [0u8; 20];
        sha.hash(&mut hash);
        assert_eq!(hash, expected);
    }
}
