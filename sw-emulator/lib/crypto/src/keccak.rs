/*++

Licensed under the Apache-2.0 license.

File Name:

    keccak.rs

Abstract:

    File contains the Keccak sponge used by the SHA-3 fixed-length digests

--*/

/// SHA-3 Mode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Sha3Mode {
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl Sha3Mode {
    /// Sponge rate in bytes
    pub const fn rate(self) -> usize {
        match self {
            Sha3Mode::Sha3_224 => 144,
            Sha3Mode::Sha3_256 => 136,
            Sha3Mode::Sha3_384 => 104,
            Sha3Mode::Sha3_512 => 72,
        }
    }

    pub const fn hash_len(self) -> usize {
        match self {
            Sha3Mode::Sha3_224 => 28,
            Sha3Mode::Sha3_256 => 32,
            Sha3Mode::Sha3_384 => 48,
            Sha3Mode::Sha3_512 => 64,
        }
    }
}

/// Keccak-f[1600] sponge in absorbing state
#[derive(Debug, Clone)]
pub struct Keccak {
    lanes: [u64; 25],
    mode: Sha3Mode,
}

impl Keccak {
    /// Number of 32-bit words of sponge state
    pub const STATE_WORDS: usize = 50;

    pub fn new(mode: Sha3Mode) -> Self {
        Self {
            lanes: [0u64; 25],
            mode,
        }
    }

    /// Rebuild a sponge from saved lanes, low half first
    pub fn from_words(mode: Sha3Mode, words: &[u32]) -> Self {
        let mut lanes = [0u64; 25];
        lanes
            .iter_mut()
            .zip(words.chunks_exact(2))
            .for_each(|(l, w)| *l = u64::from(w[0]) | (u64::from(w[1]) << 32));
        Self { lanes, mode }
    }

    /// Export the lanes, low half first
    pub fn to_words(&self, words: &mut [u32]) {
        words
            .iter_mut()
            .zip(self.lanes.iter().flat_map(|l| [*l as u32, (*l >> 32) as u32]))
            .for_each(|(w, l)| *w = l);
    }

    /// Absorb one rate-sized block
    ///
    /// # Arguments
    ///
    /// * `block` - Exactly `mode.rate()` bytes
    pub fn update(&mut self, block: &[u8]) {
        debug_assert_eq!(block.len(), self.mode.rate());
        for (lane, chunk) in self.lanes.iter_mut().zip(block.chunks_exact(8)) {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            *lane ^= u64::from_le_bytes(bytes);
        }
        keccak::f1600(&mut self.lanes);
    }

    /// Squeeze the digest; the sponge must have absorbed the padded tail
    pub fn hash(&self, hash: &mut [u8]) {
        self.lanes
            .iter()
            .flat_map(|l| l.to_le_bytes())
            .take(self.mode.hash_len())
            .zip(hash)
            .for_each(|(src, dest)| *dest = src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(mode: Sha3Mode, msg: &[u8]) -> Vec<u8> {
        let mut block = vec![0u8; mode.rate()];
        block[..msg.len()].copy_from_slice(msg);
        block[msg.len()] ^= 0x06;
        *block.last_mut().unwrap() ^= 0x80;
        block
    }

    #[test]
    fn test_sha3_256_abc() {
        let mut sponge = Keccak::new(Sha3Mode::Sha3_256);
        sponge.update(&padded(Sha3Mode::Sha3_256, b"abc"));

        #[cfg_attr(rustfmt, rustfmt_skip)]
        let expected: [u8; 32] = [
            0x3a, 0x98, 0x5d, 0xa7, 0x4f, 0xe2, 0x25, 0xb2, 0x04, 0x5c, 0x17, 0x2d, 0x6b, 0xd3, 0x90, 0xbd,
            0x85, 0x5f, 0x08, 0x6e, 0x3e, 0x9d, 0x52, 0x5b, 0x46, 0xbf, 0xe2, 0x45, 0x11, 0x43, 0x15, 0x32,
        ];

        let mut hash = [0u8; 32];
        sponge.hash(&mut hash);
        assert_eq!(hash, expected);
    }

    #[test]
    fn test_sha3_512_abc() {
        let mut sponge = Keccak::new(Sha3Mode::Sha3_512);
        sponge.update(&padded(Sha3Mode::Sha3_512, b"abc"));

        #[cfg_attr(rustfmt, rustfmt_skip)]
        let expected: [u8; 64] = [
            0xb7, 0x51, 0x85, 0x0b, 0x1a, 0x57, 0x16, 0x8a, 0x56, 0x93, 0xcd, 0x92, 0x4b, 0x6b, 0x09, 0x6e,
            0x08, 0xf6, 0x21, 0x82, 0x74, 0x44, 0xf7, 0x0d, 0x88, 0x4f, 0x5d, 0x02, 0x40, 0xd2, 0x71, 0x2e,
            0x10, 0xe1, 0x16, 0xe9, 0x19, 0x2a, 0xf3, 0xc9, 0x1a, 0x7e, 0xc5, 0x76, 0x47, 0xe3, 0x93, 0x40,
            0x57, 0x34, 0x0b, 0x4c, 0xf4, 0x08, 0xd5, 0xa5, 0x65, 0x92, 0xf8, 0x27, 0x4e, 0xec, 0x53, 0xf0,
        ];

        let mut hash = [0u8; 64];
        sponge.hash(&mut hash);
        assert_eq!(hash, expected);
    }
}
